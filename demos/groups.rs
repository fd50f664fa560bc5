use termlog::{Emitter, Logger};

fn main() {
    let log = Logger::new();
    log.say("Hello, world!");
    // each worker collects its report and prints it in one block
    let handles: Vec<_> = (0..5)
        .map(|i| {
            let group = log.group();
            std::thread::spawn(move || {
                termlog::say!(group, "worker {i}");
                for step in 0..3 {
                    termlog::notice!(group, "step {step} done");
                    std::thread::sleep(std::time::Duration::from_millis(10));
                }
                if i % 2 == 0 {
                    group.warn("even workers warn");
                }
                group.done();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let stream = log.stream("stream");
    stream.say("lines come out right away");
    log.say("something else");
    stream.shout("and the header is repeated");
}

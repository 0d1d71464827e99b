//! beanfeed-ingest - Import configured institutions' data files.

fn main() -> std::process::ExitCode {
    beanfeed::cmd::ingest::main()
}

//! beanfeed-inflation - Generate inflation-adjusted price directives.

fn main() -> std::process::ExitCode {
    beanfeed::cmd::inflation_cmd::main()
}

use rust_dmr_diylisp::{cmdline, Environment};
use std::rc::Rc;

fn main() -> Result<(), cmdline::Error> {
    pretty_env_logger::init();
    let env = Rc::new(Environment::new());
    let args = std::env::args().collect();
    cmdline::launch(args, &env)
}

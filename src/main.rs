use hasm::cli::command;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    command::terminal_init();
    command::root(command::CommandRoot::from_args());
}

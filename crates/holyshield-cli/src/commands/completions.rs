use clap::CommandFactory;
use clap_complete::Shell;

use crate::Cli;

pub fn run(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "holyshield", &mut std::io::stdout());
}

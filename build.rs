use clap::Shell;
use std::{env, path::PathBuf};

#[path = "src/cli.rs"]
mod cli;

fn main() {
    let mut out_dir = match env::var_os("OUT_DIR") {
        Some(out_dir) => PathBuf::from(out_dir),
        None => return,
    };
    out_dir.pop();
    out_dir.pop();
    out_dir.pop();

    let mut cli = cli::generate_cli();
    cli.gen_completions("droid-report", Shell::Bash, &out_dir);
    cli.gen_completions("droid-report", Shell::Fish, &out_dir);
    cli.gen_completions("droid-report", Shell::Zsh, &out_dir);
}

// Command line front end for the trie.
// 3 sub-commands
// - root: build a trie from a values file and print its root
// - prove: print the root and the proof for one value
// - verify: check a proof against a root, exit code 1 if it does not verify
use clap::Parser;
use noisemixer::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    cli::init_logging(&args.log_level);

    let output = cli::run(&args)?;
    println!("{}", output.text);
    if !output.success {
        std::process::exit(1);
    }
    Ok(())
}

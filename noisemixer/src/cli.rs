use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::debug;
use noisetree::{
    def::DEFAULT_DEPTH, utils::hasher, verify_proof_with, Config, InclusionProof, NodeEncoding,
    Trie,
};
use serde_json::json;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Insert every non-empty line of a file and print the root
    Root {
        #[arg(long)]
        values: PathBuf,
    },
    /// Build the trie from a file and print the root and the proof for one value
    Prove {
        #[arg(long)]
        values: PathBuf,

        #[arg(long)]
        value: String,
    },
    /// Check a proof against a root without building any trie
    Verify {
        #[arg(long)]
        value: String,

        /// Proof as a JSON array of [sibling_hex, "left"|"right"] pairs
        #[arg(long)]
        proof: String,

        /// Root hash in hex
        #[arg(long)]
        root: String,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "noisemixer", about = "Build, prove and verify sparse Merkle trie commitments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Number of routing bits per value
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// How child hashes are joined: "hex" or "raw"
    #[arg(long, default_value = "hex")]
    pub encoding: NodeEncoding,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Text to print and whether the command succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl Cli {
    pub fn trie_config(&self) -> Config {
        Config::new(self.depth, self.encoding)
    }
}

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

/// Builds a trie from the non-empty lines of `path`.
pub fn load_trie(path: &Path, config: Config) -> anyhow::Result<Trie> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read values from {}", path.display()))?;
    let mut trie = Trie::with_config(config)?;
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !trie.insert(line)? {
            debug!("skipping duplicate value {:?}", line);
        }
    }
    debug!("loaded {} values from {}", trie.len(), path.display());
    Ok(trie)
}

pub fn run(cli: &Cli) -> anyhow::Result<CommandOutput> {
    let config = cli.trie_config();
    config.validate()?;
    match &cli.command {
        Command::Root { values } => {
            let trie = load_trie(values, config)?;
            Ok(CommandOutput {
                text: trie.root_hex().unwrap_or_default(),
                success: true,
            })
        }
        Command::Prove { values, value } => {
            let trie = load_trie(values, config)?;
            let proof = trie.get_proof(value)?;
            let out = json!({
                "root": trie.root_hex(),
                "proof": proof,
            });
            Ok(CommandOutput {
                text: out.to_string(),
                success: true,
            })
        }
        Command::Verify { value, proof, root } => {
            let proof = InclusionProof::from_json(proof)?;
            let root = hasher::hash_from_hex(root)
                .with_context(|| format!("invalid root hash {}", root))?;
            let valid = verify_proof_with(config.encoding, value, &proof, &root);
            Ok(CommandOutput {
                text: valid.to_string(),
                success: valid,
            })
        }
    }
}

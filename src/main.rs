use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use saltbox::crypto::{BLOCK_LEN, SALT_LEN};
use saltbox::{RawCodec, Saltbox, paths};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "saltbox")]
#[command(
    version,
    about = "Password-protected storage of values in encrypted files."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts a JSON document (or any file with --raw)
    #[command(arg_required_else_help = true)]
    Seal {
        /// File to encrypt
        input: PathBuf,

        /// Output path (default: <INPUT>.sbx, numbered if taken)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Treat the input as raw bytes instead of JSON
        #[arg(long)]
        raw: bool,

        /// Overwrite the output path if it exists
        #[arg(long)]
        force: bool,
    },

    /// Decrypts a container to stdout or a file
    #[command(arg_required_else_help = true)]
    Open {
        /// Encrypted container to open
        input: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Emit the payload as raw bytes instead of pretty JSON
        #[arg(long)]
        raw: bool,
    },

    /// Shows container structure without a password
    #[command(arg_required_else_help = true)]
    Inspect {
        /// Encrypted container to inspect
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    match args.command {
        Commands::Seal {
            input,
            output,
            raw,
            force,
        } => seal(input, output, raw, force),
        Commands::Open { input, output, raw } => open(input, output, raw),
        Commands::Inspect { input } => inspect(input),
    }
}

fn seal(input: PathBuf, output: Option<PathBuf>, raw: bool, force: bool) -> Result<()> {
    let data =
        fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;

    let target = output.unwrap_or_else(|| {
        let mut name = input.clone().into_os_string();
        name.push(".sbx");
        PathBuf::from(name)
    });
    let target = if force {
        target
    } else {
        paths::next_available_path(&target)
    };

    let password = auth::read_new_password_with_confirmation()?;

    if raw {
        Saltbox::with_codec(&target, RawCodec)
            .save(password, &data)
            .with_context(|| format!("failed to seal {}", input.display()))?;
    } else {
        let value: serde_json::Value = serde_json::from_slice(&data).with_context(|| {
            format!(
                "{} is not valid JSON (use --raw for arbitrary bytes)",
                input.display()
            )
        })?;
        Saltbox::new(&target)
            .save(password, &value)
            .with_context(|| format!("failed to seal {}", input.display()))?;
    }

    println!("sealed {} -> {}", input.display(), target.display());
    Ok(())
}

fn open(input: PathBuf, output: Option<PathBuf>, raw: bool) -> Result<()> {
    let password = auth::read_password()?;
    let context = || format!("failed to open {}", input.display());

    if raw {
        let bytes: Vec<u8> = Saltbox::with_codec(&input, RawCodec)
            .load(password)
            .with_context(context)?;
        match output {
            Some(path) => fs::write(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => io::stdout().write_all(&bytes)?,
        }
    } else {
        let value: serde_json::Value = Saltbox::new(&input).load(password).with_context(context)?;
        let pretty = serde_json::to_string_pretty(&value)?;
        match output {
            Some(path) => fs::write(&path, pretty)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => println!("{pretty}"),
        }
    }

    Ok(())
}

fn inspect(input: PathBuf) -> Result<()> {
    let mut file =
        File::open(&input).with_context(|| format!("failed to open {}", input.display()))?;
    let len = file.metadata()?.len();

    if len < SALT_LEN as u64 {
        bail!(
            "{} is too short to contain a salt ({len} of {SALT_LEN} bytes)",
            input.display()
        );
    }

    let mut salt = [0u8; SALT_LEN];
    file.read_exact(&mut salt)?;
    let ciphertext_len = len - SALT_LEN as u64;
    let aligned = ciphertext_len > 0 && ciphertext_len % BLOCK_LEN as u64 == 0;

    let salt_hex = salt.iter().map(|b| format!("{:02x}", b)).collect::<String>();
    println!("salt:       {salt_hex}");
    println!("ciphertext: {ciphertext_len} bytes");
    println!(
        "aligned:    {}",
        if aligned {
            "yes"
        } else {
            "no (not a valid container)"
        }
    );

    Ok(())
}

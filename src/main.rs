use clap::Parser;
use glyphcrypt::{decrypt, encrypt, CharsetRegistry, CryptRequest};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "glyphcrypt")]
#[command(about = "Encrypt text into themed glyph charsets", long_about = None)]
struct Cli {
    /// Message to process (reads from stdin if not provided)
    #[arg(value_name = "MESSAGE")]
    message: Option<String>,

    /// Encryption key
    #[arg(short, long, default_value = "")]
    key: String,

    /// Initialization vector string (reduced to 16 bytes)
    #[arg(short, long, default_value = "")]
    iv: String,

    /// Key-derivation salt
    #[arg(short, long)]
    salt: Option<String>,

    /// Cipher algorithm (aes128, aes192, aes256)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Charset name or alias to encode with
    #[arg(short, long)]
    charset: Option<String>,

    /// Decrypt instead of encrypt
    #[arg(short, long)]
    decrypt: bool,

    /// Only translate through the charset, without the cipher
    #[arg(long)]
    encode_only: bool,

    /// List available charsets
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let registry = CharsetRegistry::with_defaults();

    if cli.list {
        println!("Available charsets:\n");
        for name in registry.names() {
            let charset = registry.get(name).expect("listed charset resolves");
            let aliases = charset.aliases().join(", ");
            println!("  {:30} kind: {:?}, aliases: {}", name, charset.kind(), aliases);
        }
        return Ok(());
    }

    let message = match cli.message {
        Some(message) => message,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim_end_matches('\n').to_string()
        }
    };

    if cli.encode_only {
        let name = cli.charset.as_deref().unwrap_or(glyphcrypt::DEFAULT_CHARSET);
        let charset = registry
            .get(name)
            .ok_or_else(|| format!("unknown charset: {name}"))?;
        let output = if cli.decrypt {
            charset.decode(&message)?
        } else {
            charset.encode(&message)?
        };
        println!("{output}");
        return Ok(());
    }

    let request = CryptRequest {
        message: &message,
        key: &cli.key,
        iv: &cli.iv,
        salt: cli.salt.as_deref(),
        algorithm: cli.algorithm.as_deref(),
        charset: cli.charset.as_deref(),
    };

    let output = if cli.decrypt {
        decrypt(&request, &registry)?
    } else {
        encrypt(&request, &registry)?
    };
    println!("{output}");
    Ok(())
}

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use storage::{normalize_database_url, Storage};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://signouts.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Seed {
        #[arg(long, default_value_t = 20)]
        groups: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();
    let storage = Storage::new(&normalize_database_url(&cli.database_url)).await?;

    match cli.command {
        Command::Seed { groups, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let records = fixtures::generate(&mut rng, Utc::now(), groups);
            for record in &records {
                storage.insert_signout(record).await?;
            }
            println!("inserted {} rows across {groups} groups", records.len());
        }
        Command::Status => {
            let counts = storage.status_counts().await?;
            println!("out={} in={}", counts.out, counts.signed_in);
            for record in storage.open_signouts().await? {
                println!(
                    "{} {} {} {} -> {} (out since {})",
                    record.signout_id,
                    record.soldier_rank,
                    record.soldier_first_name,
                    record.soldier_last_name,
                    record.location,
                    record.sign_out_time.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dayband-cli", version, about = "Dayband schedule-curve CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the curve and its band as an ASCII chart
    Show(commands::show::ShowArgs),
    /// Apply free-form batch values to the average column
    Batch(commands::batch::BatchArgs),
    /// Adjust the variance of one slot (absolute or stepped)
    Adjust(commands::adjust::AdjustArgs),
    /// Assign a period marker at a slot
    Marker(commands::marker::MarkerArgs),
    /// Run the full pipeline and write the export CSV
    Export(commands::export::ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Adjust(args) => commands::adjust::run(args),
        Commands::Marker(args) => commands::marker::run(args),
        Commands::Export(args) => commands::export::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

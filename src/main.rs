use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotiweb::{config, error, server::Server, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on (overrides SERVER_ADDRESS)
    #[clap(long)]
    pub addr: Option<String>,

    /// Print debug log lines (same as LOG_LEVEL=debug)
    #[clap(long, short)]
    pub verbose: bool,

    /// Open the landing page in the default browser once listening
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn serve(opt: ServeOptions) {
    let mut settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot start server. Err: {}", e),
    };

    if let Some(addr) = opt.addr {
        settings.server_addr = addr;
    }
    config::set_verbose(opt.verbose || settings.debug);

    let server = match Server::bind(settings).await {
        Ok(server) => server,
        Err(e) => error!("Cannot start server. Err: {}", e),
    };

    if opt.open {
        match server.local_addr() {
            Ok(addr) => {
                let url = format!("http://{}/", addr);
                if webbrowser::open(&url).is_err() {
                    warning!(
                        "Failed to open browser. Please navigate to the following URL manually:\n{}",
                        url
                    )
                }
            }
            Err(e) => warning!("Cannot determine listen address: {}", e),
        }
    }

    if let Err(e) = server.run().await {
        error!("Server stopped. Err: {}", e);
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;

use sitewright::client::{GenerationClient, Style};
use sitewright::config::Config;
use sitewright::history::InMemoryHistory;
use sitewright::logging::init_tracing;
use sitewright::preview::FilePreview;
use sitewright::session::{Phase, SessionRuntime, SessionState};

#[derive(Parser)]
#[command(
    name = "sitewright",
    about = "Generate AI websites and browse the results like history"
)]
struct Args {
    /// Base URL of the generation service (overrides the config file).
    #[arg(long)]
    service_url: Option<String>,

    /// Style used for custom prompts: modern, minimal, corporate, creative, elegant.
    #[arg(long, default_value = "modern")]
    style: String,

    /// File each generated page is rendered into.
    #[arg(long, default_value = "site.html")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let style: Style = args.style.parse()?;

    let mut config = Config::load()?;
    if let Some(url) = args.service_url {
        config.service.base_url = url;
    }

    let service = Arc::new(GenerationClient::new(&config.service));
    let (history, navigation) = InMemoryHistory::new();
    let preview = FilePreview::new(args.out.clone());
    let (runtime, handle, mut states) = SessionRuntime::new(
        service,
        Box::new(history.clone()),
        Box::new(preview),
        navigation,
    );
    let runtime_task = tokio::spawn(runtime.run());

    println!(
        "Requesting an opening site from {} ...",
        config.service.base_url
    );
    handle.mount()?;

    let mut last_generation = 0;
    if !wait_for_result(&mut states, &history, &args.out, &mut last_generation).await {
        return Ok(());
    }

    println!("Type a prompt, or: random | back | forward | save <file> | quit");
    loop {
        let Some(line) = tokio::task::spawn_blocking(read_line).await?? else {
            break;
        };
        let line = line.trim().to_string();

        match line.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "random" => handle.generate_random()?,
            "back" => {
                if history.back().is_none() {
                    println!("Already at the oldest entry");
                    continue;
                }
            }
            "forward" => {
                if history.forward().is_none() {
                    println!("Already at the newest entry");
                    continue;
                }
            }
            _ => {
                if let Some(target) = line.strip_prefix("save ") {
                    save_markup(&states, target.trim());
                    continue;
                }
                handle.submit_prompt(line.as_str(), style)?;
            }
        }

        if !wait_for_result(&mut states, &history, &args.out, &mut last_generation).await {
            break;
        }
    }

    handle.shutdown();
    let _ = runtime_task.await;
    Ok(())
}

/// Block until the request issued under a new generation tag resolves, then
/// report it. Returns false if the runtime is gone.
async fn wait_for_result(
    states: &mut watch::Receiver<SessionState>,
    history: &InMemoryHistory,
    out: &std::path::Path,
    last_generation: &mut u64,
) -> bool {
    use sitewright::history::NavigationHistory;

    loop {
        let snapshot = states.borrow_and_update().clone();
        if snapshot.generation > *last_generation
            && matches!(snapshot.phase, Phase::Ready | Phase::Failed)
        {
            *last_generation = snapshot.generation;
            match snapshot.phase {
                Phase::Ready => {
                    println!(
                        "[{}] rendered {} bytes to {}",
                        history.address(),
                        snapshot.markup.len(),
                        out.display()
                    );
                    let quota = snapshot.quota();
                    println!("{} generations remaining today", quota.remaining);
                    if let Some(reset) = quota.reset_display {
                        println!("Daily limit resets at: {reset}");
                    }
                }
                _ => {
                    println!("Error: {}", snapshot.error.unwrap_or_default());
                }
            }
            return true;
        }
        if states.changed().await.is_err() {
            return false;
        }
    }
}

fn save_markup(states: &watch::Receiver<SessionState>, target: &str) {
    let markup = states.borrow().markup.clone();
    if markup.is_empty() {
        println!("Nothing generated yet");
        return;
    }
    match std::fs::write(target, &markup) {
        Ok(()) => println!("Saved {} bytes to {target}", markup.len()),
        Err(err) => println!("Failed to save {target}: {err}"),
    }
}

fn read_line() -> std::io::Result<Option<String>> {
    use std::io::BufRead;

    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

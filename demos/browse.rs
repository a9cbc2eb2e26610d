use pokedex_gallery::render::{HeaderView, render};
use pokedex_gallery::{Client, ControllerOptions, PageController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "commands: n (next), p (previous), s <name> (select), c (close drawer), q (quit)";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let page_size = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u32>())
        .transpose()?
        .unwrap_or(pokedex_gallery::controller::DEFAULT_PAGE_SIZE);

    let controller = PageController::with_options(
        Client::new(),
        ControllerOptions::builder().page_size(page_size).build(),
    );
    controller.load_initial().await;
    show(&controller);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_once(' ').unwrap_or((line, "")) {
            ("q", _) => break,
            ("n", _) => {
                controller.go_next().await;
            }
            ("p", _) => {
                controller.go_previous().await;
            }
            ("s", name) if !name.trim().is_empty() => {
                controller.select_by_name(name.trim());
            }
            ("c", _) => controller.close_drawer(),
            _ => {
                println!("{}", HELP);
                continue;
            }
        }
        show(&controller);
    }

    Ok(())
}

fn show(controller: &PageController) {
    let state = controller.snapshot();
    println!("{}", HeaderView::from_state(&state));
    print!("{}", render(&state));
}

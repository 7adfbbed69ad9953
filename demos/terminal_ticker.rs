use btc_ticker::{Currency, Phase, RefreshController, TickerConfig, ViewModel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn render(view: &ViewModel) {
    println!("\n{:-<50}", "");
    println!("Bitcoin Tracker ({})", view.currency);

    if let Some(error) = &view.error {
        println!("! {}", error);
    }

    if view.phase == Phase::Loading {
        println!("Loading...");
    }

    if let Some(quote) = &view.quote {
        println!("{:<12} {}  {}", "Price", quote.price, quote.change);
        println!("{:<12} {}", "Market Cap", quote.market_cap);
        println!("{:<12} {}", "24h Volume", quote.volume_24h);
        println!("{:<12} {}", "24h High", quote.high_24h);
        println!("{:<12} {}", "24h Low", quote.low_24h);
    }

    if let Some(label) = &view.last_updated_label {
        println!("Last updated: {}", label);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("btc_ticker=info")),
        )
        .init();

    let config = TickerConfig::from_env()?;
    let controller = RefreshController::from_config(&config)?;
    let mut updates = controller.subscribe();

    println!("Commands: a currency code (USD, EUR, GBP, JPY, CAD, AUD, CHF, CNY), 'r' to refresh, 'q' to quit");

    let handle = controller.start(config.initial_currency).await;
    render(&updates.borrow_and_update());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&updates.borrow_and_update());
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => {}
                    "q" => break,
                    "r" => controller.refresh().await,
                    code => match code.parse::<Currency>() {
                        Ok(currency) => controller.set_currency(currency).await,
                        Err(e) => println!("{}", e),
                    },
                }
            }
        }
    }

    handle.cancel();
    Ok(())
}

use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        )))
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(digit);
    }
    result
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.top == 0 {
        anyhow::bail!("--top must be greater than 0");
    }

    if args.min_frequency == 0 {
        anyhow::bail!("--min-frequency must be greater than 0");
    }

    if args.chunk_size == 0 {
        anyhow::bail!("--chunk-size must be greater than 0");
    }

    Ok(())
}

use anyhow::{Context, bail};
use client::{ClientConfig, SessionOutcome, run_session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cfg = parse_args()?;

    match run_session(&cfg).await? {
        SessionOutcome::Completed => Ok(()),
        SessionOutcome::Rejected => {
            bail!("server rejected the session");
        }
    }
}

fn parse_args() -> anyhow::Result<ClientConfig> {
    let mut cfg = ClientConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" => cfg.host = next_arg_value(&mut args, &arg)?,
            "--port" => {
                let value = next_arg_value(&mut args, &arg)?;
                cfg.port = value
                    .parse::<u16>()
                    .with_context(|| format!("invalid --port: {}", value))?;
            }
            "--username" => cfg.username = next_arg_value(&mut args, &arg)?,
            "--password" => cfg.password = next_arg_value(&mut args, &arg)?,
            "--room" => cfg.room_name = next_arg_value(&mut args, &arg)?,
            "--message" => cfg.message = next_arg_value(&mut args, &arg)?,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                bail!("unknown argument: {}\nUse --help for options.", other);
            }
        }
    }

    Ok(cfg)
}

fn next_arg_value(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> anyhow::Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("{} requires a value", flag))
}

fn print_help() {
    println!(
        "Chat client\n\
         \n\
         Usage: client [options]\n\
         \n\
         Options:\n\
         \x20 --host <addr>       Server address (default 127.0.0.1)\n\
         \x20 --port <port>       Server port (default 8888)\n\
         \x20 --username <name>   Username (default sadia)\n\
         \x20 --password <pass>   Password (default admin)\n\
         \x20 --room <name>       Room to join (default room1)\n\
         \x20 --message <text>    Chat message to send\n\
         \x20 --help              Show this help"
    );
}

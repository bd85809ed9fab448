use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    str::FromStr,
};

use raffle_draw::{
    logging,
    service::{parse_choice, parse_purchase, Command, MenuChoice, RaffleService, MENU, PURCHASE_PROMPT},
    Raffle, RaffleConfig,
};

const USAGE: &str =
    "usage: raffle [--seed <u64>] [--pot-seed <amount>] [--ticket-price <amount>] [--max-tickets <count>]";

struct Options {
    seed: Option<u64>,
    config: RaffleConfig,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        seed: None,
        config: RaffleConfig::default(),
    };
    let mut args = args;

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;

        match flag.as_str() {
            "--seed" => options.seed = Some(parse_value(&flag, &value)?),
            "--pot-seed" => options.config.pot_seed = parse_value(&flag, &value)?,
            "--ticket-price" => options.config.ticket_price = parse_value(&flag, &value)?,
            "--max-tickets" => {
                options.config.max_tickets_per_participant = parse_value(&flag, &value)?
            }
            _ => return Err(format!("unknown flag {flag}")),
        }
    }

    Ok(options)
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn run(service: &mut RaffleService) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        writeln!(out, "Welcome to My Raffle App")?;
        writeln!(out, "Status: {}\n", service.status())?;
        for entry in MENU {
            writeln!(out, "{entry}")?;
        }
        write!(out, "\nEnter your choice: ")?;
        out.flush()?;

        let Some(choice) = read_line(&mut input)? else {
            return Ok(());
        };
        let command = match parse_choice(&choice) {
            Ok(MenuChoice::StartDraw) => Command::StartDraw,
            Ok(MenuChoice::RunDraw) => Command::RunDraw,
            Ok(MenuChoice::BuyTickets) => {
                write!(out, "{PURCHASE_PROMPT}")?;
                out.flush()?;
                let Some(line) = read_line(&mut input)? else {
                    return Ok(());
                };
                match parse_purchase(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        writeln!(out, "{err}\n")?;
                        continue;
                    }
                }
            }
            Err(err) => {
                writeln!(out, "{err}\n")?;
                continue;
            }
        };

        writeln!(out)?;
        service.dispatch(command, &mut out)?;
        write!(out, "Press enter to return to the main menu")?;
        out.flush()?;
        if read_line(&mut input)?.is_none() {
            return Ok(());
        }
        writeln!(out)?;
    }
}

fn main() -> ExitCode {
    logging::route_logs_to_stderr();

    let options = match parse_options(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let raffle = match options.seed {
        Some(seed) => {
            raffle_draw::log!("Raffle seeded with {}", seed);
            Raffle::with_seed(options.config, seed)
        }
        None => Raffle::new(options.config),
    };
    let mut service = match raffle {
        Ok(raffle) => RaffleService::new(raffle),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

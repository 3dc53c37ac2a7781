use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use crossterm::event::KeyCode;
use reqwest::Url;

use gameplay::games::breakthrough::{initial_board, invert, Action, Breakthrough, BLACK, WHITE};
use gameplay::games::{Game, GameState, GameStatus};

mod tui;

enum Player {
    Human,
    Agent(Url),
}

/// Ask an agent for a move. Agents always play the side moving down the
/// board, so White's position is sent inverted and the answer mirrored back.
async fn query_agent(
    client: &reqwest::Client,
    url: &Url,
    state: &Breakthrough,
    player: usize,
) -> anyhow::Result<Action> {
    let board = if player == BLACK {
        *state.board()
    } else {
        invert(state.board())
    };
    let action = client
        .post(url.clone())
        .json(&board)
        .send()
        .await?
        .error_for_status()?
        .json::<Action>()
        .await?;
    let action = if player == BLACK {
        action
    } else {
        action.mirror()
    };
    if !state.valid_action(&action) {
        bail!("Action is invalid: {}", action);
    }
    Ok(action)
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move(Action),
    Flip,
    Reset,
    Quit,
}

/// Feed one key into the partially typed move. Moves are only returned once
/// they are legal; anything else clears the input.
fn handle_key(state: &Breakthrough, input: &mut String, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Char('i') => return Some(Command::Flip),
        KeyCode::Char('r') => return Some(Command::Reset),
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_alphanumeric() && input.len() < 4 => {
            input.push(c.to_ascii_lowercase());
        }
        _ => {}
    }
    if input.len() == 4 {
        match input.parse::<Action>() {
            Ok(action) if state.valid_action(&action) => return Some(Command::Move(action)),
            _ => input.clear(),
        }
    }
    None
}

fn read_human_command(state: &Breakthrough, flipped: bool) -> anyhow::Result<Command> {
    let mut input = String::new();
    loop {
        tui::show_breakthrough(state, Some(&input), flipped)?;
        if let Some(command) = handle_key(state, &mut input, tui::read_key()?) {
            return Ok(command);
        }
    }
}

async fn cli_breakthrough_match(white: Player, black: Player) -> anyhow::Result<()> {
    // Wrap the match in setup/cleanup so we make sure to cleanup on any error.
    tui::setup()?;
    let result = _cli_breakthrough_match(white, black).await;
    tui::cleanup()?;
    result
}

async fn _cli_breakthrough_match(white: Player, black: Player) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let mut flipped = false;

    'game: loop {
        let mut state = Breakthrough::default();
        let mut status = state.status();
        while let GameStatus::InProgress { next_player } = status {
            let player = match next_player {
                WHITE => &white,
                BLACK => &black,
                _ => unreachable!(),
            };

            let action = match player {
                Player::Human => match read_human_command(&state, flipped)? {
                    Command::Move(action) => action,
                    Command::Flip => {
                        flipped = !flipped;
                        continue;
                    }
                    Command::Reset => continue 'game,
                    Command::Quit => return Ok(()),
                },
                Player::Agent(url) => {
                    tui::show_breakthrough(&state, None, flipped)?;
                    match query_agent(&client, url, &state, next_player).await {
                        Ok(action) => action,
                        Err(err) => {
                            tui::show_error(&format!("{:#}", err))?;
                            while tui::read_char()? != 'q' {}
                            return Ok(());
                        }
                    }
                }
            };
            status = state.apply_action(&action)?;
        }

        loop {
            tui::show_breakthrough(&state, None, flipped)?;
            match tui::read_char()? {
                'q' => return Ok(()),
                'r' => continue 'game,
                'i' => flipped = !flipped,
                _ => {}
            }
        }
    }
}

/// Ask the agent for Black's reply to the opening position and check it.
async fn test_agent(url: Url) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let state = Breakthrough::new(initial_board(), BLACK);
    let action = query_agent(&client, &url, &state, BLACK)
        .await
        .with_context(|| format!("agent at {} failed", url))?;
    println!("{} answered {}", url, action);
    Ok(())
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    game: Game,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match. Sides without a URL are played from the keyboard.
    Play {
        #[arg(long)]
        white_url: Option<Url>,
        #[arg(long)]
        black_url: Option<Url>,
    },
    /// Test an agent
    Test { url: Url },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Only one game so far, everything assumes breakthrough.
    assert_eq!(args.game, Game::Breakthrough);

    match args.command {
        Commands::Play {
            white_url,
            black_url,
        } => {
            let white = match white_url {
                Some(url) => Player::Agent(url),
                None => Player::Human,
            };
            let black = match black_url {
                Some(url) => Player::Agent(url),
                None => Player::Human,
            };
            cli_breakthrough_match(white, black).await?;
        }
        Commands::Test { url } => test_agent(url).await?,
    }

    Ok(())
}

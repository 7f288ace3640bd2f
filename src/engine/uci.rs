//! Parser for the line-oriented [UCI] command stream.
//!
//! Parsing is intentionally forgiving: unknown tokens inside a known
//! command are skipped and a completely unknown line is reported back as
//! [`Command::Unknown`] so the engine can answer with an `info string`
//! instead of dying. Corrupted input from a tournament manager is not worth
//! recovering from beyond that.
//!
//! [UCI]: https://www.chessprogramming.org/UCI

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Uci,
    IsReady,
    NewGame,
    SetPosition {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go {
        depth: Option<u8>,
        wtime: Option<u64>,
        btime: Option<u64>,
        winc: Option<u64>,
        binc: Option<u64>,
        movetime: Option<u64>,
        movestogo: Option<u64>,
        infinite: bool,
    },
    Stop,
    Quit,
    Unknown(String),
}

fn parse_go(parts: &[&str]) -> Command {
    let mut depth = None;
    let mut wtime = None;
    let mut btime = None;
    let mut winc = None;
    let mut binc = None;
    let mut movetime = None;
    let mut movestogo = None;
    let mut infinite = false;

    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" if i + 1 < parts.len() => depth = parts[i + 1].parse().ok(),
            "wtime" if i + 1 < parts.len() => wtime = parts[i + 1].parse().ok(),
            "btime" if i + 1 < parts.len() => btime = parts[i + 1].parse().ok(),
            "winc" if i + 1 < parts.len() => winc = parts[i + 1].parse().ok(),
            "binc" if i + 1 < parts.len() => binc = parts[i + 1].parse().ok(),
            "movetime" if i + 1 < parts.len() => movetime = parts[i + 1].parse().ok(),
            "movestogo" if i + 1 < parts.len() => movestogo = parts[i + 1].parse().ok(),
            "infinite" => infinite = true,
            _ => {}
        }
        if parts[i] == "infinite" {
            i += 1;
        } else {
            i += 2;
        }
    }

    Command::Go {
        depth,
        wtime,
        btime,
        winc,
        binc,
        movetime,
        movestogo,
        infinite,
    }
}

fn parse_setposition(parts: &[&str]) -> Command {
    let fen_index = parts.iter().position(|&token| token == "fen");
    let moves_index = parts.iter().position(|&token| token == "moves");
    let fen = fen_index
        .map(|index| parts[index + 1..moves_index.unwrap_or(parts.len())].join(" "));
    let moves = match moves_index {
        Some(index) => parts[index + 1..].iter().map(ToString::to_string).collect(),
        None => vec![],
    };
    Command::SetPosition { fen, moves }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.first() {
            Some(&"uci") => Command::Uci,
            Some(&"isready") => Command::IsReady,
            Some(&"ucinewgame") => Command::NewGame,
            Some(&"position") => parse_setposition(&parts),
            Some(&"go") => parse_go(&parts),
            Some(&"stop") => Command::Stop,
            Some(&"quit") => Command::Quit,
            _ => Command::Unknown(input.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("uci"), Command::Uci);
        assert_eq!(Command::parse("isready"), Command::IsReady);
        assert_eq!(Command::parse("ucinewgame"), Command::NewGame);
        assert_eq!(Command::parse("stop"), Command::Stop);
        assert_eq!(Command::parse("quit\n"), Command::Quit);
    }

    #[test]
    fn parse_position() {
        assert_eq!(
            Command::parse("position startpos moves e2e4 e7e5"),
            Command::SetPosition {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()]
            }
        );
        assert_eq!(
            Command::parse(
                "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 \
                 moves e2e4"
            ),
            Command::SetPosition {
                fen: Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string()),
                moves: vec!["e2e4".to_string()]
            }
        );
        assert_eq!(
            Command::parse("position startpos"),
            Command::SetPosition {
                fen: None,
                moves: vec![]
            }
        );
    }

    #[test]
    fn parse_go() {
        assert_eq!(
            Command::parse("go depth 20 wtime 300000 btime 300000 winc 10000 binc 10000 \
                            movetime 5000 movestogo 40"),
            Command::Go {
                depth: Some(20),
                wtime: Some(300_000),
                btime: Some(300_000),
                winc: Some(10_000),
                binc: Some(10_000),
                movetime: Some(5000),
                movestogo: Some(40),
                infinite: false,
            }
        );
        assert_eq!(
            Command::parse("go depth 10"),
            Command::Go {
                depth: Some(10),
                wtime: None,
                btime: None,
                winc: None,
                binc: None,
                movetime: None,
                movestogo: None,
                infinite: false,
            }
        );
        assert_eq!(
            Command::parse("go infinite"),
            Command::Go {
                depth: None,
                wtime: None,
                btime: None,
                winc: None,
                binc: None,
                movetime: None,
                movestogo: None,
                infinite: true,
            }
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            Command::parse("setoption name Hash value 128"),
            Command::Unknown("setoption name Hash value 128".to_string())
        );
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }
}

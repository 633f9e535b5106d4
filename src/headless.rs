//! Headless runner: drives a session with a fixed clock and a scripted
//! command cycle, no terminal involved.

use anyhow::{bail, Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::core::{FixedSequence, GameSession, GameSnapshot, PieceSource};
use crate::types::{GameCommand, PieceKind};

pub const DEFAULT_FRAMES: u32 = 3_600;

/// Frames between scripted commands.
pub const COMMAND_EVERY: u32 = 12;

/// Default repeating command script; ends with a hard drop so pieces keep
/// landing.
pub const SCRIPT: [GameCommand; 8] = [
    GameCommand::MoveLeft,
    GameCommand::Rotate,
    GameCommand::MoveLeft,
    GameCommand::SoftDrop,
    GameCommand::MoveRight,
    GameCommand::MoveRight,
    GameCommand::Rotate,
    GameCommand::HardDrop,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessArgs {
    pub seed: Option<u64>,
    pub frames: u32,
    /// Commands issued in a cycle, one every [`COMMAND_EVERY`] frames
    pub script: Vec<GameCommand>,
    /// Fixed piece order; `None` draws uniformly at random
    pub pieces: Option<Vec<PieceKind>>,
}

impl Default for HeadlessArgs {
    fn default() -> Self {
        Self {
            seed: None,
            frames: DEFAULT_FRAMES,
            script: SCRIPT.to_vec(),
            pieces: None,
        }
    }
}

impl HeadlessArgs {
    /// Parse the arguments after the subcommand:
    /// `--seed N`, `--frames N`, `--script moveLeft,rotate,hardDrop`,
    /// `--pieces IOT`.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let flag = arg.as_ref();
            let Some(value) = it.next() else {
                bail!("{flag} requires a value");
            };
            let v = value.as_ref();

            match flag {
                "--seed" => {
                    let seed = v.parse::<u64>().with_context(|| format!("invalid --seed: {v:?}"))?;
                    out.seed = Some(seed);
                }
                "--frames" => {
                    out.frames =
                        v.parse::<u32>().with_context(|| format!("invalid --frames: {v:?}"))?;
                }
                "--script" => out.script = parse_script(v)?,
                "--pieces" => out.pieces = Some(parse_pieces(v)?),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(out)
    }
}

/// Comma-separated command names, e.g. `moveLeft,rotate,hardDrop`.
fn parse_script(v: &str) -> Result<Vec<GameCommand>> {
    let script = v
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            GameCommand::from_str(name).with_context(|| format!("unknown command: {name}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if script.is_empty() {
        bail!("--script needs at least one command");
    }
    Ok(script)
}

/// Piece letters, e.g. `IOT`; commas and spaces are ignored.
fn parse_pieces(v: &str) -> Result<Vec<PieceKind>> {
    let pieces = v
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            let mut buf = [0u8; 4];
            PieceKind::from_str(c.encode_utf8(&mut buf))
                .with_context(|| format!("unknown piece: {c}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if pieces.is_empty() {
        bail!("--pieces needs at least one piece");
    }
    Ok(pieces)
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub frames_run: u32,
    pub snapshot: GameSnapshot,
}

/// Run `script` until `frames` elapse or the round ends.
pub fn simulate<S: PieceSource>(
    session: &mut GameSession<S>,
    script: &[GameCommand],
    frames: u32,
    frame_ms: u32,
) -> HeadlessReport {
    session.start();

    let mut frames_run = 0;
    let mut commands = script.iter().copied().cycle();
    while frames_run < frames && !session.game_over() {
        frames_run += 1;
        session.advance_time(frame_ms);

        if frames_run % COMMAND_EVERY == 0 {
            if let Some(command) = commands.next() {
                session.apply(command);
            }
        }
    }

    info!(
        "headless run finished after {} frames: score {} lines {} level {}",
        frames_run,
        session.score(),
        session.lines(),
        session.level()
    );

    HeadlessReport {
        frames_run,
        snapshot: session.snapshot(),
    }
}

/// Entry point for `blockfall headless ...`; returns the JSON document.
pub fn run(config: &AppConfig, args: &HeadlessArgs) -> Result<String> {
    let mut session_config = config.session_config();
    if args.seed.is_some() {
        session_config.seed = args.seed;
    }

    let report = match &args.pieces {
        Some(pieces) => {
            let source = FixedSequence::new(pieces.clone());
            let mut session = GameSession::with_source(session_config, source);
            simulate(&mut session, &args.script, args.frames, config.frame_ms)
        }
        None => {
            let mut session = GameSession::new(session_config);
            simulate(&mut session, &args.script, args.frames, config.frame_ms)
        }
    };

    serde_json::to_string_pretty(&report.snapshot).context("failed to encode snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;
    use serde_json::Value;

    fn fixed(kinds: &[PieceKind]) -> GameSession<FixedSequence> {
        GameSession::with_source(SessionConfig::default(), FixedSequence::new(kinds.to_vec()))
    }

    #[test]
    fn test_parse_defaults() {
        let args = HeadlessArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args, HeadlessArgs::default());
        assert_eq!(args.script, SCRIPT.to_vec());
    }

    #[test]
    fn test_parse_flags() {
        let args = HeadlessArgs::parse(["--frames", "10", "--seed", "7"]).unwrap();
        assert_eq!(args.frames, 10);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_parse_script_by_command_name() {
        let args = HeadlessArgs::parse(["--script", "moveLeft, rotate,HARDDROP"]).unwrap();
        assert_eq!(
            args.script,
            vec![GameCommand::MoveLeft, GameCommand::Rotate, GameCommand::HardDrop]
        );
    }

    #[test]
    fn test_parse_pieces_by_letter() {
        let args = HeadlessArgs::parse(["--pieces", "i,o t"]).unwrap();
        assert_eq!(
            args.pieces,
            Some(vec![PieceKind::I, PieceKind::O, PieceKind::T])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(HeadlessArgs::parse(["--seed"]).is_err());
        assert!(HeadlessArgs::parse(["--frames", "many"]).is_err());
        assert!(HeadlessArgs::parse(["--speed", "3"]).is_err());
        assert!(HeadlessArgs::parse(["--script", "jump"]).is_err());
        assert!(HeadlessArgs::parse(["--script", ","]).is_err());
        assert!(HeadlessArgs::parse(["--pieces", "IQ"]).is_err());
        assert!(HeadlessArgs::parse(["--pieces", ""]).is_err());
    }

    #[test]
    fn test_simulate_stops_at_frame_budget() {
        let mut session = fixed(&[PieceKind::T]);
        let report = simulate(&mut session, &SCRIPT, 50, 16);

        assert_eq!(report.frames_run, 50);
        assert!(report.snapshot.playing);
        assert_eq!(report.snapshot.round, 1);
    }

    #[test]
    fn test_simulate_runs_until_game_over() {
        let mut session = fixed(&[PieceKind::O]);
        let report = simulate(&mut session, &SCRIPT, u32::MAX, 16);

        assert!(report.snapshot.game_over);
        assert!(report.snapshot.active.is_none());
        assert!(report.frames_run < u32::MAX);
    }

    #[test]
    fn test_simulate_follows_script() {
        // Nine hard drops stack O pieces up to the spawn rows.
        let mut session = fixed(&[PieceKind::O]);
        let report = simulate(&mut session, &[GameCommand::HardDrop], u32::MAX, 16);

        assert!(report.snapshot.game_over);
        assert_eq!(report.frames_run, 9 * COMMAND_EVERY);
    }

    #[test]
    fn test_run_with_fixed_pieces() {
        let args = HeadlessArgs {
            frames: COMMAND_EVERY,
            script: vec![GameCommand::HardDrop],
            pieces: Some(vec![PieceKind::I, PieceKind::T]),
            ..HeadlessArgs::default()
        };
        let v: Value = serde_json::from_str(&run(&AppConfig::default(), &args).unwrap()).unwrap();

        assert_eq!(v["active"]["kind"], "T");
        assert_eq!(v["board"][19 * 10 + 3], PieceKind::I.color_id());
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = AppConfig::default();
        let args = HeadlessArgs {
            seed: Some(99),
            frames: 2_000,
            ..HeadlessArgs::default()
        };
        assert_eq!(run(&config, &args).unwrap(), run(&config, &args).unwrap());
    }
}

//! Interactive player shell
//!
//! Reads one command per line, applies it to the playback queue manager and
//! prints whatever changed. Track numbers shown and typed are 1-based.

use crate::error::{CliError, Result};
use melody_catalog::{CatalogQuery, TrackCatalog};
use melody_core::{Genre, Track, User};
use melody_playback::{LoopMode, PlaybackEvent, PlaybackQueueManager};
use melody_session::UserSession;
use std::io::Write;
use std::rc::Rc;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  load featured|new [start]     load a catalog listing into the queue
  load search <query> [start]   load search results
  load genre <id> [start]       load tracks of a genre
  genres                        list catalog genres
  play <n>                      play track n of the queue
  next | prev                   move through the queue
  shuffle on|off                toggle shuffle
  loop none|all|one             set loop mode
  fav [n]                       toggle favorite (current track, or track n)
  login <name> [token]          log in
  logout                        log out
  queue | status                show the queue / player state
  recent | favorites            show recently played / favorite tracks
  help                          show this help
  quit                          leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Load { query: CatalogQuery, start: usize },
    Genres,
    Play(usize),
    Next,
    Previous,
    Shuffle(bool),
    Loop(LoopMode),
    Favorite(Option<usize>),
    Login { name: String, token: String },
    Logout,
    Queue,
    Status,
    Recent,
    Favorites,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or_else(|| CliError::InvalidCommand("empty line".to_string()))?;
        let args: Vec<&str> = words.collect();

        let parsed = match (command, args.as_slice()) {
            ("load", [kind, rest @ ..]) => parse_load(kind, rest)?,
            ("genres", []) => Self::Genres,
            ("play", [n]) => Self::Play(parse_position(n)?),
            ("next", []) => Self::Next,
            ("prev" | "previous", []) => Self::Previous,
            ("shuffle", ["on"]) => Self::Shuffle(true),
            ("shuffle", ["off"]) => Self::Shuffle(false),
            ("loop", [mode]) => Self::Loop(mode.parse()?),
            ("fav", []) => Self::Favorite(None),
            ("fav", [n]) => Self::Favorite(Some(parse_position(n)?)),
            ("login", [name]) => Self::Login {
                name: (*name).to_string(),
                token: String::new(),
            },
            ("login", [name, token]) => Self::Login {
                name: (*name).to_string(),
                token: (*token).to_string(),
            },
            ("logout", []) => Self::Logout,
            ("queue", []) => Self::Queue,
            ("status", []) => Self::Status,
            ("recent", []) => Self::Recent,
            ("favorites", []) => Self::Favorites,
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => return Err(CliError::InvalidCommand(line.trim().to_string())),
        };

        Ok(parsed)
    }
}

/// `load <kind> [args..] [start]`
fn parse_load(kind: &str, rest: &[&str]) -> Result<ShellCommand> {
    // A trailing number is the start position, unless it is the only argument
    // of a search or genre
    let min_args = usize::from(matches!(kind, "search" | "genre"));
    let (args, start) = match rest.split_last() {
        Some((last, init)) if init.len() >= min_args && last.parse::<usize>().is_ok() => {
            (init, parse_position(last)?)
        }
        _ => (rest, 0),
    };

    let query = match (kind, args) {
        ("featured", []) => CatalogQuery::Featured,
        ("new", []) => CatalogQuery::NewReleases,
        ("search", words) if !words.is_empty() => CatalogQuery::Search(words.join(" ")),
        ("genre", [id]) => CatalogQuery::Genre((*id).to_string()),
        _ => {
            return Err(CliError::InvalidCommand(format!(
                "load {} {}",
                kind,
                rest.join(" ")
            )))
        }
    };

    Ok(ShellCommand::Load { query, start })
}

/// 1-based position to 0-based index
fn parse_position(word: &str) -> Result<usize> {
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CliError::InvalidCommand(format!(
            "expected a track number, got {:?}",
            word
        ))),
    }
}

/// Whether the shell keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive player
pub struct Shell<'a> {
    player: PlaybackQueueManager,
    session: Rc<UserSession>,
    catalog: &'a dyn TrackCatalog,
    limit: u32,
}

impl<'a> Shell<'a> {
    /// `player` must use `session` as its session provider
    pub fn new(
        player: PlaybackQueueManager,
        session: Rc<UserSession>,
        catalog: &'a dyn TrackCatalog,
        limit: u32,
    ) -> Self {
        Self {
            player,
            session,
            catalog,
            limit,
        }
    }

    pub fn player(&self) -> &PlaybackQueueManager {
        &self.player
    }

    /// Read commands from `input` until it ends or `quit` is entered
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            write!(out, "melody> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<ShellCommand>() {
                Ok(command) => {
                    debug!(?command, "Executing shell command");
                    match self.execute(command, out).await {
                        Ok(flow) => flow,
                        Err(e) => {
                            warn!(error = %e, "Shell command failed");
                            writeln!(out, "error: {}", e)?;
                            Flow::Continue
                        }
                    }
                }
                Err(e) => {
                    writeln!(out, "error: {} (type 'help')", e)?;
                    Flow::Continue
                }
            };

            self.print_events(out)?;

            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one command
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<Flow> {
        match command {
            ShellCommand::Load { query, start } => {
                let tracks = self.catalog.fetch_tracks(&query, self.limit).await;
                if tracks.is_empty() {
                    writeln!(out, "No tracks found")?;
                } else {
                    self.player.set_queue(tracks, start)?;
                }
            }
            ShellCommand::Genres => {
                let genres = self.catalog.fetch_genres().await;
                print_genres(out, &genres)?;
            }
            ShellCommand::Play(index) => self.player.play_track(index)?,
            ShellCommand::Next => {
                if !self.player.next_track() {
                    writeln!(out, "End of queue")?;
                }
            }
            ShellCommand::Previous => {
                if !self.player.previous_track() {
                    writeln!(out, "Start of queue")?;
                }
            }
            ShellCommand::Shuffle(enable) => self.player.toggle_shuffle(enable),
            ShellCommand::Loop(mode) => self.player.set_loop_mode(mode),
            ShellCommand::Favorite(index) => {
                let track = match index {
                    Some(index) => self.player.queue().get(index).cloned().ok_or_else(|| {
                        CliError::InvalidCommand(format!("no track {} in the queue", index + 1))
                    })?,
                    None => match self.player.current_track() {
                        Some(track) => track.clone(),
                        None => {
                            writeln!(out, "Nothing is playing")?;
                            return Ok(Flow::Continue);
                        }
                    },
                };
                self.player.toggle_favorite(&track);
            }
            ShellCommand::Login { name, token } => {
                self.session.login(User::new(name.as_str()), token)?;
                writeln!(out, "Logged in as {}", name)?;
            }
            ShellCommand::Logout => {
                self.session.logout()?;
                writeln!(out, "Logged out")?;
            }
            ShellCommand::Queue => {
                if self.player.queue().is_empty() {
                    writeln!(out, "Queue is empty")?;
                }
                for (index, track) in self.player.queue().iter().enumerate() {
                    let marker = if Some(index) == self.player.current_index() {
                        '>'
                    } else {
                        ' '
                    };
                    writeln!(out, "{}{}", marker, format_track(index, track))?;
                }
            }
            ShellCommand::Status => self.print_status(out)?,
            ShellCommand::Recent => {
                let recent: Vec<Track> =
                    self.player.recently_played().into_iter().cloned().collect();
                print_tracks(out, &recent)?;
            }
            ShellCommand::Favorites => print_tracks(out, self.player.favorites())?,
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        match (self.player.current_index(), self.player.current_track()) {
            (Some(index), Some(track)) => writeln!(out, "Playing: {}", format_track(index, track))?,
            _ => writeln!(out, "Playing: nothing")?,
        }

        writeln!(
            out,
            "Queue: {} tracks | shuffle {} | loop {} | next {} | previous {}",
            self.player.queue_len(),
            if self.player.is_shuffled() { "on" } else { "off" },
            self.player.loop_mode(),
            yes_no(self.player.has_next()),
            yes_no(self.player.has_previous()),
        )?;

        match self.session.user() {
            Some(user) => writeln!(out, "User: {}", user.name)?,
            None => writeln!(out, "User: not logged in")?,
        }

        Ok(())
    }

    fn print_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for event in self.player.drain_events() {
            match event {
                PlaybackEvent::TrackChanged { index, .. } => {
                    if let Some(track) = self.player.queue().get(index) {
                        writeln!(out, "Now playing {}", format_track(index, track))?;
                    }
                }
                PlaybackEvent::QueueChanged { length } => {
                    writeln!(out, "Queue: {} tracks", length)?;
                }
                PlaybackEvent::ShuffleChanged { enabled } => {
                    writeln!(out, "Shuffle {}", if enabled { "on" } else { "off" })?;
                }
                PlaybackEvent::LoopModeChanged { mode } => writeln!(out, "Loop {}", mode)?,
                PlaybackEvent::FavoriteToggled {
                    track_id,
                    is_favorite,
                } => {
                    let verb = if is_favorite { "Added" } else { "Removed" };
                    let direction = if is_favorite { "to" } else { "from" };
                    writeln!(out, "{} {} {} favorites", verb, track_id, direction)?;
                }
                PlaybackEvent::Notice { message } => writeln!(out, "! {}", message)?,
            }
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// `  3. Title - Artist [album, genre] 4:05`
pub fn format_track(index: usize, track: &Track) -> String {
    format!(
        "{:>3}. {} - {} [{}, {}] {}:{:02}",
        index + 1,
        track.title,
        track.artist,
        track.album,
        track.genre,
        track.duration / 60,
        track.duration % 60
    )
}

/// Numbered track listing
pub fn print_tracks<W: Write>(out: &mut W, tracks: &[Track]) -> std::io::Result<()> {
    if tracks.is_empty() {
        return writeln!(out, "No tracks");
    }
    for (index, track) in tracks.iter().enumerate() {
        writeln!(out, " {}", format_track(index, track))?;
    }
    Ok(())
}

/// Genre listing
pub fn print_genres<W: Write>(out: &mut W, genres: &[Genre]) -> std::io::Result<()> {
    for genre in genres {
        writeln!(out, "{:<16} {} ({} tracks)", genre.id, genre.name, genre.track_count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        line.parse().unwrap()
    }

    #[test]
    fn parses_load_variants() {
        assert_eq!(
            parse("load featured"),
            ShellCommand::Load {
                query: CatalogQuery::Featured,
                start: 0
            }
        );
        assert_eq!(
            parse("load new 3"),
            ShellCommand::Load {
                query: CatalogQuery::NewReleases,
                start: 2
            }
        );
        assert_eq!(
            parse("load search night drive 2"),
            ShellCommand::Load {
                query: CatalogQuery::Search("night drive".to_string()),
                start: 1
            }
        );
        // A lone number is the search text
        assert_eq!(
            parse("load search 1999"),
            ShellCommand::Load {
                query: CatalogQuery::Search("1999".to_string()),
                start: 0
            }
        );
        assert_eq!(
            parse("load genre jazz"),
            ShellCommand::Load {
                query: CatalogQuery::Genre("jazz".to_string()),
                start: 0
            }
        );
    }

    #[test]
    fn parses_player_commands() {
        assert_eq!(parse("play 1"), ShellCommand::Play(0));
        assert_eq!(parse("prev"), ShellCommand::Previous);
        assert_eq!(parse("shuffle on"), ShellCommand::Shuffle(true));
        assert_eq!(parse("loop all"), ShellCommand::Loop(LoopMode::All));
        assert_eq!(parse("fav"), ShellCommand::Favorite(None));
        assert_eq!(parse("fav 4"), ShellCommand::Favorite(Some(3)));
        assert_eq!(
            parse("login ana tok"),
            ShellCommand::Login {
                name: "ana".to_string(),
                token: "tok".to_string()
            }
        );
        assert_eq!(parse("  quit  "), ShellCommand::Quit);
    }

    #[test]
    fn rejects_bad_lines() {
        for line in [
            "",
            "dance",
            "play 0",
            "play x",
            "shuffle maybe",
            "loop forever",
            "load",
            "load search",
            "load genre",
            "load featured extra",
        ] {
            assert!(line.parse::<ShellCommand>().is_err(), "accepted {:?}", line);
        }
    }

    #[test]
    fn formats_duration() {
        let track = Track {
            title: "Epic Journey".to_string(),
            artist: "Scott Buckley".to_string(),
            album: "Cinematic Atmospheres".to_string(),
            genre: "electronic".to_string(),
            duration: 245,
            ..Default::default()
        };
        assert_eq!(
            format_track(0, &track),
            "  1. Epic Journey - Scott Buckley [Cinematic Atmospheres, electronic] 4:05"
        );
    }
}

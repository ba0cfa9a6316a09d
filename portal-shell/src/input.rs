//! Line-delimited JSON event source
//!
//! Each line holds one [`ShellInput`], e.g.
//! `{"type":"control","control":{"service":"Wiki"}}`. Blank lines and lines
//! starting with `#` are skipped; `quit` ends the session.

use crossbeam_channel::Sender;
use portal_core::ShellInput;
use std::io::BufRead;
use std::thread;

/// Events fed into the host loop
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Input(ShellInput),
    Quit,
}

/// Parse one input line. Returns `None` for lines that carry no event.
pub fn parse_line(line: &str) -> Option<HostEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line == "quit" {
        return Some(HostEvent::Quit);
    }

    match serde_json::from_str::<ShellInput>(line) {
        Ok(input) => Some(HostEvent::Input(input)),
        Err(e) => {
            ::log::warn!("Ignoring malformed input line: {} ({})", line, e);
            None
        }
    }
}

/// Read events from `reader` on a worker thread until EOF, `quit`, or the
/// receiving side hangs up. EOF is reported as [`HostEvent::Quit`].
pub fn spawn_reader<R>(reader: R, tx: Sender<HostEvent>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    ::log::error!("Failed to read input: {}", e);
                    break;
                }
            };

            if let Some(event) = parse_line(&line) {
                let quit = event == HostEvent::Quit;
                if tx.send(event).is_err() || quit {
                    return;
                }
            }
        }
        let _ = tx.send(HostEvent::Quit);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use portal_core::Control;
    use std::io::Cursor;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# comment"), None);
        assert_eq!(parse_line("quit"), Some(HostEvent::Quit));
        assert_eq!(parse_line("{ not json"), None);
        assert_eq!(
            parse_line(r#"{"type":"control","control":"toggle"}"#),
            Some(HostEvent::Input(ShellInput::click(Control::Toggle)))
        );
    }

    #[test]
    fn test_reader_forwards_until_eof() {
        let (tx, rx) = unbounded();
        let input = "{\"type\":\"control\",\"control\":\"lock\"}\n\ngarbage\n{\"type\":\"touch_cancel\"}\n";
        spawn_reader(Cursor::new(input), tx).join().unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                HostEvent::Input(ShellInput::click(Control::Lock)),
                HostEvent::Input(ShellInput::TouchCancel),
                HostEvent::Quit,
            ]
        );
    }

    #[test]
    fn test_reader_stops_at_quit() {
        let (tx, rx) = unbounded();
        let input = "quit\n{\"type\":\"control\",\"control\":\"lock\"}\n";
        spawn_reader(Cursor::new(input), tx).join().unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![HostEvent::Quit]);
    }
}

//! Key decoding.
//!
//! A [KeyDecoder] turns whatever the terminal delivers into one [Key] per call.
//! [EventDecoder] reads crossterm events and works on every platform crossterm
//! supports. [ByteDecoder] reads a raw byte stream and understands either ANSI
//! escape sequences or the console scan-code prefixes, see [Grammar].
//!
//! The decoder is picked once at start-up by [select_decoder] and handed to the
//! interaction loop.

use crate::config::InputMode;
use crate::errors::DecodeError;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use std::io::{self, Read};

/// Platform-independent key vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Esc,
    Backspace,
    Char(char),
    /// Ctrl+C.
    Interrupt,
    /// The terminal was resized. Carries no input but asks for a redraw.
    Resize,
    /// Any key or sequence without a meaning here.
    Unknown,
}

pub trait KeyDecoder {
    /// Blocks until one complete key has been read.
    fn read_key(&mut self) -> Result<Key, DecodeError>;
}

/// Decoder backed by crossterm's event reader.
#[derive(Debug, Default)]
pub struct EventDecoder;

impl KeyDecoder for EventDecoder {
    fn read_key(&mut self) -> Result<Key, DecodeError> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(map_key_event(key)),
                Event::Resize(_, _) => return Ok(Key::Resize),
                _ => {}
            }
        }
    }
}

pub fn map_key_event(key: KeyEvent) -> Key {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Key::Interrupt,
            _ => Key::Unknown,
        };
    }
    match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Key::Char(c),
        _ => Key::Unknown,
    }
}

/// Byte-level key grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `ESC [ A..D` / `ESC O A..D` arrow sequences. A lone Esc key is sent as two ESC bytes.
    Ansi,
    /// `0xE0` or `0x00` followed by a scan code (`H`, `P`, `M`, `K` for the arrows).
    Console,
}

impl Grammar {
    pub fn native() -> Self {
        if cfg!(windows) {
            Grammar::Console
        } else {
            Grammar::Ansi
        }
    }
}

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

/// Decoder over a raw byte stream.
pub struct ByteDecoder<R: Read> {
    reader: R,
    grammar: Grammar,
}

impl<R: Read> ByteDecoder<R> {
    pub fn new(reader: R, grammar: Grammar) -> Self {
        ByteDecoder { reader, grammar }
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Err(DecodeError::Closed),
                Ok(_) => return Ok(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Consumes the rest of an ANSI sequence whose introducer was already read.
    fn read_escape(&mut self) -> Result<Key, DecodeError> {
        let intro = self.next_byte()?;
        match intro {
            ESC => Ok(Key::Esc),
            b'[' | b'O' => {
                // Parameters and intermediates run until a final byte in 0x40..=0x7e.
                let mut last = self.next_byte()?;
                let mut simple = true;
                while !(0x40..=0x7e).contains(&last) {
                    simple = false;
                    last = self.next_byte()?;
                }
                Ok(match (simple, last) {
                    (true, b'A') => Key::Up,
                    (true, b'B') => Key::Down,
                    (true, b'C') => Key::Right,
                    (true, b'D') => Key::Left,
                    _ => Key::Unknown,
                })
            }
            _ => Ok(Key::Unknown),
        }
    }

    fn read_scan_code(&mut self) -> Result<Key, DecodeError> {
        Ok(match self.next_byte()? {
            b'H' => Key::Up,
            b'P' => Key::Down,
            b'M' => Key::Right,
            b'K' => Key::Left,
            _ => Key::Unknown,
        })
    }

    /// Reads the continuation bytes of a UTF-8 character.
    fn read_utf8(&mut self, lead: u8) -> Result<Key, DecodeError> {
        let len = match lead {
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Ok(Key::Unknown),
        };
        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            *slot = self.next_byte()?;
        }
        Ok(std::str::from_utf8(&bytes[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Key::Unknown, Key::Char))
    }
}

impl<R: Read> KeyDecoder for ByteDecoder<R> {
    fn read_key(&mut self) -> Result<Key, DecodeError> {
        let byte = self.next_byte()?;
        match (self.grammar, byte) {
            (_, CTRL_C) => Ok(Key::Interrupt),
            (_, b'\r' | b'\n') => Ok(Key::Enter),
            (_, b'\t') => Ok(Key::Tab),
            (_, 0x7f | 0x08) => Ok(Key::Backspace),
            (Grammar::Ansi, ESC) => self.read_escape(),
            (Grammar::Console, ESC) => Ok(Key::Esc),
            (Grammar::Console, 0xe0 | 0x00) => self.read_scan_code(),
            (_, 0x20..=0x7e) => Ok(Key::Char(byte as char)),
            (Grammar::Ansi, 0x80..=0xff) => self.read_utf8(byte),
            _ => Ok(Key::Unknown),
        }
    }
}

/// Builds the decoder configured for this session.
pub fn select_decoder(mode: InputMode) -> Box<dyn KeyDecoder> {
    match mode {
        InputMode::Events => Box::new(EventDecoder),
        InputMode::Bytes => Box::new(ByteDecoder::new(io::stdin(), Grammar::native())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode_all(bytes: &[u8], grammar: Grammar) -> Vec<Key> {
        let mut decoder = ByteDecoder::new(Cursor::new(bytes.to_vec()), grammar);
        let mut keys = Vec::new();
        while let Ok(key) = decoder.read_key() {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn ansi_arrows_and_plain_keys() {
        let keys = decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[Dq/\r\t", Grammar::Ansi);
        assert_eq!(
            keys,
            [
                Key::Up,
                Key::Down,
                Key::Right,
                Key::Left,
                Key::Char('q'),
                Key::Char('/'),
                Key::Enter,
                Key::Tab
            ]
        );
    }

    #[test]
    fn ansi_application_mode_and_unknown_sequences() {
        // ESC O A is the application-cursor form, ESC [ 3 ~ is Delete.
        let keys = decode_all(b"\x1bOA\x1b[3~x", Grammar::Ansi);
        assert_eq!(keys, [Key::Up, Key::Unknown, Key::Char('x')]);
    }

    #[test]
    fn ansi_double_escape_is_esc() {
        assert_eq!(decode_all(b"\x1b\x1bh", Grammar::Ansi), [Key::Esc, Key::Char('h')]);
    }

    #[test]
    fn truncated_sequence_never_yields_partial_key() {
        let mut decoder = ByteDecoder::new(Cursor::new(b"\x1b[".to_vec()), Grammar::Ansi);
        assert!(matches!(decoder.read_key(), Err(DecodeError::Closed)));
    }

    #[test]
    fn console_scan_codes() {
        let keys = decode_all(b"\xe0H\xe0P\x00M\xe0K\xe0Zs\x1b", Grammar::Console);
        assert_eq!(
            keys,
            [
                Key::Up,
                Key::Down,
                Key::Right,
                Key::Left,
                Key::Unknown,
                Key::Char('s'),
                Key::Esc
            ]
        );
    }

    #[test]
    fn ctrl_c_is_interrupt_in_both_grammars() {
        assert_eq!(decode_all(b"\x03", Grammar::Ansi), [Key::Interrupt]);
        assert_eq!(decode_all(b"\x03", Grammar::Console), [Key::Interrupt]);
    }

    #[test]
    fn utf8_characters_decode_whole() {
        assert_eq!(decode_all("é".as_bytes(), Grammar::Ansi), [Key::Char('é')]);
    }

    #[test]
    fn crossterm_events_map_to_keys() {
        let ev = |code, modifiers| map_key_event(KeyEvent::new(code, modifiers));
        assert_eq!(ev(KeyCode::Char('c'), KeyModifiers::CONTROL), Key::Interrupt);
        assert_eq!(ev(KeyCode::Char('x'), KeyModifiers::CONTROL), Key::Unknown);
        assert_eq!(ev(KeyCode::Char('S'), KeyModifiers::SHIFT), Key::Char('S'));
        assert_eq!(ev(KeyCode::Up, KeyModifiers::NONE), Key::Up);
        assert_eq!(ev(KeyCode::F(5), KeyModifiers::NONE), Key::Unknown);
    }
}

use thiserror::Error;

use crate::storage::Store;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace on the line
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("wrong number of arguments for '{command}' (want: {want}, got: {got})")]
    WrongArity {
        command: &'static str,
        want: usize,
        got: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    SetNx { key: String, value: String },
    Append { key: String, value: String },
    Get { key: String },
    Del { key: String },
    Len,
    Keys,
    Clear,
    Quit,
}

pub mod request {
    use super::{Command, ParseError};
    use crate::storage::Store;

    pub const RES_NX: i32 = 1;
    pub const RES_OK: i32 = 0;
    pub const RES_ERR: i32 = -1;

    /// Writes one answer line: the status word, then `data` if there is any
    pub fn serialize(status_code: i32, data: &str, buf: &mut String) {
        let status = match status_code {
            RES_OK => "OK",
            RES_NX => "NX",
            _ => "ERR",
        };
        buf.reserve(status.len() + data.len() + 2);

        buf.push_str(status);
        if !data.is_empty() {
            buf.push(' ');
            buf.push_str(data);
        }
        buf.push('\n');
    }

    pub fn encode_error(err: &ParseError, buf: &mut String) {
        serialize(RES_ERR, &err.to_string(), buf)
    }

    pub fn handle_and_encode_request(store: &mut Store, cmd: Command, buf: &mut String) {
        match cmd {
            Command::Set { key, value } => {
                store.set(key, value);
                serialize(RES_OK, "", buf)
            }
            Command::SetNx { key, value } => {
                let created = store.set_nx(key, value);
                serialize(RES_OK, if created { "1" } else { "0" }, buf)
            }
            Command::Append { key, value } => {
                let len = store.append(key, value);
                serialize(RES_OK, &len.to_string(), buf)
            }
            Command::Get { key } => match store.get(&key) {
                Some(v) => serialize(RES_OK, v, buf),
                None => serialize(RES_NX, "", buf),
            },
            Command::Del { key } => match store.del(&key) {
                Some(v) => serialize(RES_OK, &v, buf),
                None => serialize(RES_NX, "", buf),
            },
            Command::Len => serialize(RES_OK, &store.len().to_string(), buf),
            Command::Keys => {
                let keys: Vec<&str> = store.entries().into_iter().map(|(k, _)| k).collect();
                serialize(RES_OK, &keys.join(" "), buf)
            }
            Command::Clear => serialize(RES_OK, &store.clear().to_string(), buf),
            Command::Quit => serialize(RES_OK, "bye", buf),
        }
    }
}

/// Parses one line into a [`Command`].
///
/// Arguments are whitespace separated, the command word is case-insensitive.
pub fn parse_request(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let name = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let cmd = match name.as_str() {
        "set" => {
            let [key, value] = expect_args::<2>("set", &args)?;
            Command::Set {
                key: key.into(),
                value: value.into(),
            }
        }
        "setnx" => {
            let [key, value] = expect_args::<2>("setnx", &args)?;
            Command::SetNx {
                key: key.into(),
                value: value.into(),
            }
        }
        "append" => {
            let [key, value] = expect_args::<2>("append", &args)?;
            Command::Append {
                key: key.into(),
                value: value.into(),
            }
        }
        "get" => {
            let [key] = expect_args::<1>("get", &args)?;
            Command::Get { key: key.into() }
        }
        "del" => {
            let [key] = expect_args::<1>("del", &args)?;
            Command::Del { key: key.into() }
        }
        "len" => {
            expect_args::<0>("len", &args)?;
            Command::Len
        }
        "keys" => {
            expect_args::<0>("keys", &args)?;
            Command::Keys
        }
        "clear" => {
            expect_args::<0>("clear", &args)?;
            Command::Clear
        }
        "quit" => Command::Quit,
        _ => return Err(ParseError::UnknownCommand(name)),
    };

    Ok(cmd)
}

/// Answers one input line into `buf`.
/// Returns `false` once the session should end
pub fn handle_line(store: &mut Store, line: &str, buf: &mut String) -> bool {
    match parse_request(line) {
        Ok(Command::Quit) => {
            request::handle_and_encode_request(store, Command::Quit, buf);
            false
        }
        Ok(cmd) => {
            request::handle_and_encode_request(store, cmd, buf);
            true
        }
        // blank lines get no answer
        Err(ParseError::Empty) => true,
        Err(e) => {
            request::encode_error(&e, buf);
            true
        }
    }
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(args).map_err(|_| ParseError::WrongArity {
        command,
        want: N,
        got: args.len(),
    })
}

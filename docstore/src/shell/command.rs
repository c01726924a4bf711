use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// A single line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert { key: String, ttl: u32, value: Value },
    Get { key: String },
    Upsert { key: String, ttl: u32, value: Value },
    Replace { key: String, version: u64, ttl: u32, value: Value },
    Remove { key: String, version: u64 },
    Touch { key: String, version: u64, ttl: u32 },
    Flush,
    Len,
    Evict,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Splits off the first whitespace separated token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

struct Arguments<'a> {
    rest: &'a str,
}

impl<'a> Arguments<'a> {
    fn word(&mut self, name: &'static str) -> Result<&'a str, ParseError> {
        let (token, rest) = next_token(self.rest).ok_or(ParseError::MissingArgument(name))?;
        self.rest = rest;
        Ok(token)
    }

    fn number<N: FromStr>(&mut self, name: &'static str) -> Result<N, ParseError> {
        let token = self.word(name)?;
        token
            .parse::<N>()
            .map_err(|_err| ParseError::InvalidNumber(name, token.to_string()))
    }

    /// Everything left on the line, parsed as one JSON value
    fn json(&mut self) -> Result<Value, ParseError> {
        let raw = self.rest.trim();
        if raw.is_empty() {
            return Err(ParseError::MissingArgument("value"));
        }
        self.rest = "";
        serde_json::from_str(raw).map_err(|err| ParseError::InvalidJson(err.to_string()))
    }

    fn finish(self) -> Result<(), ParseError> {
        match next_token(self.rest) {
            Some((token, _rest)) => Err(ParseError::UnexpectedArgument(token.to_string())),
            None => Ok(()),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = next_token(line).ok_or(ParseError::Empty)?;
        let mut args = Arguments { rest };
        let command = match name.to_ascii_lowercase().as_str() {
            "insert" => Command::Insert {
                key: args.word("key")?.to_string(),
                ttl: args.number("ttl")?,
                value: args.json()?,
            },
            "get" => Command::Get {
                key: args.word("key")?.to_string(),
            },
            "upsert" => Command::Upsert {
                key: args.word("key")?.to_string(),
                ttl: args.number("ttl")?,
                value: args.json()?,
            },
            "replace" => Command::Replace {
                key: args.word("key")?.to_string(),
                version: args.number("version")?,
                ttl: args.number("ttl")?,
                value: args.json()?,
            },
            "remove" => Command::Remove {
                key: args.word("key")?.to_string(),
                version: args.number("version")?,
            },
            "touch" => Command::Touch {
                key: args.word("key")?.to_string(),
                version: args.number("version")?,
                ttl: args.number("ttl")?,
            },
            "flush" => Command::Flush,
            "len" => Command::Len,
            "evict" => Command::Evict,
            _ => return Err(ParseError::UnknownCommand(name.to_string())),
        };
        args.finish()?;
        Ok(command)
    }
}

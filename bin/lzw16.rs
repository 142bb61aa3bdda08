#![forbid(unsafe_code)]
use std::io::{Read, Write};
use std::path::PathBuf;
use std::{env, ffi, fs, io, process};

use lzw16::{decode, encode, serial, Error};

fn main() -> CodingResult {
    CodingResult::catch_panic(|| {
        let flags = Flags::from_args(env::args_os()).unwrap_or_else(|ParamError| explain());
        run_coding(flags)
    })
}

fn run_coding(flags: Flags) -> Result<(), io::Error> {
    let operation = flags.operation.unwrap_or_else(explain);

    let data = match &flags.input {
        Input::File(path) => fs::read(path)?,
        Input::Stdin => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };

    let out = io::stdout();
    let mut out = out.lock();

    match operation {
        Operation::Encode => {
            let codes = encode(&data);
            let payload = match flags.format {
                Format::Binary => serial::to_binary(&codes),
                Format::Text => serial::to_text(&codes).into_bytes(),
            };
            if flags.verbose {
                eprintln!(
                    "encoded {:.1} KiB into {} codes, {:.1} KiB serialized",
                    kib(data.len()),
                    codes.len(),
                    kib(payload.len()),
                );
            }
            out.write_all(&payload)
        }
        Operation::Decode => {
            let codes = match flags.format {
                Format::Binary => serial::from_binary(&data).map_err(invalid_data)?,
                Format::Text => {
                    let text = std::str::from_utf8(&data)
                        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
                    // Shell pipelines tend to append a newline to the list.
                    serial::from_text(text.trim_end()).map_err(invalid_data)?
                }
            };
            let bytes = decode(&codes).map_err(invalid_data)?;
            if flags.verbose {
                eprintln!(
                    "decoded {} codes into {:.1} KiB",
                    codes.len(),
                    kib(bytes.len()),
                );
            }
            out.write_all(&bytes)
        }
    }
}

fn invalid_data(err: Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err.to_string())
}

fn kib(len: usize) -> f64 {
    len as f64 / 1024.0
}

struct Flags {
    input: Input,
    operation: Option<Operation>,
    format: Format,
    verbose: bool,
}

struct ParamError;

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Stdin,
}

#[derive(Debug)]
enum Operation {
    Encode,
    Decode,
}

#[derive(Debug)]
enum Format {
    Binary,
    Text,
}

fn explain<T>() -> T {
    println!(
        "Usage: lzw16 [-e|-d] [-f binary|text] <file>\n\
        Arguments:\n\
        -e\t operation encode\n\
        -d\t operation decode\n\
        -f\t serialized form of the code stream (default binary)\n\
        -v\t report sizes on stderr\n\
        <file>\tfilepath or '-' for stdin"
    );
    process::exit(1);
}

impl Default for Flags {
    fn default() -> Flags {
        Flags {
            input: Input::Stdin,
            operation: None,
            format: Format::Binary,
            verbose: false,
        }
    }
}

fn command() -> clap::Command<'static> {
    clap::Command::new("lzw16")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress and expand byte streams as 16-bit LZW codes")
        .arg(
            clap::Arg::new("decode")
                .short('d')
                .long("decode")
                .takes_value(false),
        )
        .arg(
            clap::Arg::new("encode")
                .short('e')
                .long("encode")
                .takes_value(false),
        )
        .group(
            clap::ArgGroup::new("operation")
                .args(&["decode", "encode"])
                .multiple(false)
                .required(true),
        )
        .arg(
            clap::Arg::new("format")
                .short('f')
                .long("format")
                .takes_value(true)
                .default_value("binary")
                .value_parser(["binary", "text"]),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .takes_value(false),
        )
        .arg(
            clap::Arg::new("file")
                .default_value("-")
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
}

impl Flags {
    fn from_args(mut args: impl Iterator<Item = ffi::OsString>) -> Result<Self, ParamError> {
        let mut flags = Flags::default();
        let matches = command().get_matches_from(args.by_ref());

        if matches.contains_id("decode") {
            flags.operation = Some(Operation::Decode);
        } else if matches.contains_id("encode") {
            flags.operation = Some(Operation::Encode);
        }

        match matches.get_one::<String>("format").map(String::as_str) {
            Some("binary") => flags.format = Format::Binary,
            Some("text") => flags.format = Format::Text,
            Some(_) => unreachable!("unparsed format"),
            _ => {}
        }

        flags.verbose = matches.contains_id("verbose");

        match matches.get_one::<PathBuf>("file") {
            None => flags.input = Input::Stdin,
            Some(p) if *p == PathBuf::from("-") => flags.input = Input::Stdin,
            Some(p) => flags.input = Input::File(p.clone()),
        }

        Ok(flags)
    }
}

enum CodingResult {
    Ok,
    Err(io::Error),
    Panic,
}

impl CodingResult {
    fn catch_panic(op: fn() -> Result<(), io::Error>) -> Self {
        std::panic::catch_unwind(|| match op() {
            Ok(()) => CodingResult::Ok,
            Err(err) => CodingResult::Err(err),
        })
        .unwrap_or(CodingResult::Panic)
    }
}

impl std::process::Termination for CodingResult {
    fn report(self) -> std::process::ExitCode {
        match self {
            CodingResult::Ok => std::process::ExitCode::SUCCESS,
            CodingResult::Err(err) => {
                eprintln!("{}", err);
                std::process::ExitCode::FAILURE
            }
            CodingResult::Panic => {
                eprintln!(
                    "The process failed irrecoverably! This should never happen and is a bug."
                );
                std::process::ExitCode::from(128)
            }
        }
    }
}

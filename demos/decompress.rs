//! Decompresses binary-serialized codes from stdin and writes the bytes to stdout.

use std::io::{self, BufWriter, Read, Write};

fn main() {
    match (|| -> io::Result<()> {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        let codes = lzw16::serial::from_binary(&data)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        let bytes = lzw16::decode(&codes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        let stdout = io::stdout();
        let mut stdout = BufWriter::new(stdout.lock());
        stdout.write_all(&bytes)?;
        Ok(())
    })() {
        Ok(()) => (),
        Err(err) => eprintln!("{}", err),
    }
}

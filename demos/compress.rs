//! Compresses the input from stdin and writes binary-serialized codes to stdout.

use std::io::{self, BufWriter, Read, Write};

fn main() {
    match (|| -> io::Result<()> {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        let codes = lzw16::encode(&data);
        let stdout = io::stdout();
        let mut stdout = BufWriter::new(stdout.lock());
        stdout.write_all(&lzw16::serial::to_binary(&codes))?;
        Ok(())
    })() {
        Ok(()) => (),
        Err(err) => eprintln!("{}", err),
    }
}

use std::io::{self, BufRead, Write};

use kvtable::{
    protocol,
    storage::{Config, Store},
};
use log::{info, trace};

fn main() -> Result<(), kvtable::Error> {
    env_logger::builder().init();

    let config = Config::from_env()?;
    let mut store = Store::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut out = String::with_capacity(1024);

    for line in stdin.lock().lines() {
        let line = line.inspect_err(|e| trace!(target: "stdin", "error on stdin read {e}"))?;

        out.clear();
        let keep_going = protocol::handle_line(&mut store, &line, &mut out);
        stdout.write_all(out.as_bytes())?;
        stdout.flush()?;

        if !keep_going {
            break;
        }
    }

    info!(target: "session", "session closed with {} keys", store.len());
    Ok(())
}

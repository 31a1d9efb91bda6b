use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process;

use ls8::cpu::Cpu;
use ls8::output::StdOutput;
use ls8::timer::WallClock;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().env().init().unwrap();

    if let Err(e) = run() {
        eprintln!("ls8: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let path = match env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: ls8 <program.ls8>");
            process::exit(2);
        }
    };

    let mut clock = WallClock::new();
    let mut output = StdOutput::new();
    let mut cpu = Cpu::new(&mut clock, &mut output);

    let file = File::open(&path)?;
    cpu.load_program(&mut BufReader::new(file))?;
    cpu.run()?;
    Ok(())
}

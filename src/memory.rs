use std::io::BufRead;

use crate::errors::Ls8Error;

// NB. addresses are u8 as per the LS-8; with 256 cells that makes all
//     register-held and stack addressing modulo the memory size by
//     construction, so no memory access can land out of range

/// how much RAM the machine has
pub const MEM_SIZE: usize = 256;

/// Flat byte-addressable RAM, zeroed at power-on. The program image,
/// the stack and the interrupt vector table all live in here; the
/// memory itself doesn't know about any of them.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEM_SIZE],
        }
    }

    /// read one cell
    pub fn read(&self, addr: u8) -> u8 {
        self.bytes[addr as usize]
    }

    /// write one cell
    pub fn write(&mut self, addr: u8, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// load an `.ls8` text image into memory starting at address 0.
    /// one instruction or data byte per line, written as 8 binary
    /// digits; `#` lines and blank lines are skipped; anything after
    /// the first 8 characters is ignored
    pub fn load_program(&mut self, reader: &mut impl BufRead) -> Result<(), Ls8Error> {
        let mut address = 0;
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let digits: String = line.chars().take(8).collect();
            let value = u8::from_str_radix(&digits, 2).map_err(|e| Ls8Error::Load {
                line: number + 1,
                reason: e.to_string(),
            })?;
            if address >= MEM_SIZE {
                return Err(Ls8Error::ProgramTooLarge);
            }
            self.bytes[address] = value;
            address += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let m = Memory::new();
        assert_eq!(m.bytes, [0; MEM_SIZE]);
    }

    #[test]
    fn test_write_then_read() {
        let mut m = Memory::new();
        m.write(0xf4, 0xab);
        assert_eq!(m.read(0xf4), 0xab);
        assert_eq!(m.read(0xf3), 0x00);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), Ls8Error> {
        let mut m = Memory::new();
        let mut prog: &[u8] = b"10000010\n00000000\n00001000\n00000001\n";
        m.load_program(&mut prog)?;
        assert_eq!(m.bytes[..5], [0b1000_0010, 0, 8, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_load_skips_comments_and_blanks() -> Result<(), Ls8Error> {
        let mut m = Memory::new();
        let mut prog: &[u8] = b"# print8.ls8\n\n10000010\n\n# trailer\n00000001\n";
        m.load_program(&mut prog)?;
        assert_eq!(m.bytes[..3], [0b1000_0010, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_load_ignores_trailing_text() -> Result<(), Ls8Error> {
        let mut m = Memory::new();
        let mut prog: &[u8] = b"10000010 # LDI R0,8\n";
        m.load_program(&mut prog)?;
        assert_eq!(m.bytes[0], 0b1000_0010);
        Ok(())
    }

    #[test]
    fn test_load_rejects_bad_digits() {
        let mut m = Memory::new();
        let mut prog: &[u8] = b"10000010\nLDI R0 8\n";
        match m.load_program(&mut prog) {
            Err(Ls8Error::Load { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected load error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_rejects_oversized_image() {
        let mut m = Memory::new();
        let text = "00000000\n".repeat(MEM_SIZE + 1);
        let mut prog = text.as_bytes();
        assert!(matches!(
            m.load_program(&mut prog),
            Err(Ls8Error::ProgramTooLarge)
        ));
    }
}

use crate::errors::Ls8Error;

/// One-byte LS-8 opcodes. The encoding carries its own metadata: bits
/// 7-6 are the operand count and bit 4 marks instructions that set the
/// program counter themselves instead of letting the dispatcher
/// advance it. Keeping the byte as the enum discriminant means that
/// metadata is derived in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ret = 0b0001_0001,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Pra = 0b0100_1000,
    Call = 0b0101_0000,
    Jmp = 0b0101_0100,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    Inc = 0b0110_0101,
    Dec = 0b0110_0110,
    Not = 0b0110_1001,
    Ldi = 0b1000_0010,
    St = 0b1000_0100,
    Add = 0b1010_0000,
    Mul = 0b1010_0010,
    Mod = 0b1010_0100,
    Cmp = 0b1010_0111,
    And = 0b1010_1000,
    Or = 0b1010_1010,
    Xor = 0b1010_1011,
    Shl = 0b1010_1100,
    Shr = 0b1010_1101,
}

impl Opcode {
    /// decode an instruction byte; anything outside the table is fatal
    pub fn from_byte(byte: u8, pc: usize) -> Result<Opcode, Ls8Error> {
        use Opcode::*;
        Ok(match byte {
            0b0000_0001 => Hlt,
            0b0001_0001 => Ret,
            0b0100_0101 => Push,
            0b0100_0110 => Pop,
            0b0100_0111 => Prn,
            0b0100_1000 => Pra,
            0b0101_0000 => Call,
            0b0101_0100 => Jmp,
            0b0101_0101 => Jeq,
            0b0101_0110 => Jne,
            0b0110_0101 => Inc,
            0b0110_0110 => Dec,
            0b0110_1001 => Not,
            0b1000_0010 => Ldi,
            0b1000_0100 => St,
            0b1010_0000 => Add,
            0b1010_0010 => Mul,
            0b1010_0100 => Mod,
            0b1010_0111 => Cmp,
            0b1010_1000 => And,
            0b1010_1010 => Or,
            0b1010_1011 => Xor,
            0b1010_1100 => Shl,
            0b1010_1101 => Shr,
            _ => return Err(Ls8Error::IllegalInstruction { byte, pc }),
        })
    }

    /// how many operand bytes follow the instruction byte (bits 7-6)
    pub fn operand_count(self) -> usize {
        (self as u8 >> 6) as usize
    }

    /// true for instructions that write the program counter themselves
    /// (bit 4); the dispatcher must not advance past these
    pub fn sets_pc(self) -> bool {
        (self as u8 >> 4) & 1 == 1
    }

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Hlt => "HLT",
            Ret => "RET",
            Push => "PUSH",
            Pop => "POP",
            Prn => "PRN",
            Pra => "PRA",
            Call => "CALL",
            Jmp => "JMP",
            Jeq => "JEQ",
            Jne => "JNE",
            Inc => "INC",
            Dec => "DEC",
            Not => "NOT",
            Ldi => "LDI",
            St => "ST",
            Add => "ADD",
            Mul => "MUL",
            Mod => "MOD",
            Cmp => "CMP",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Shl => "SHL",
            Shr => "SHR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Opcode; 24] = [
        Opcode::Hlt,
        Opcode::Ret,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Prn,
        Opcode::Pra,
        Opcode::Call,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Not,
        Opcode::Ldi,
        Opcode::St,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Mod,
        Opcode::Cmp,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
    ];

    #[test]
    fn test_decode_roundtrip() -> Result<(), Ls8Error> {
        for op in ALL {
            assert_eq!(Opcode::from_byte(op as u8, 0)?, op);
        }
        Ok(())
    }

    #[test]
    fn test_operand_counts() {
        assert_eq!(Opcode::Hlt.operand_count(), 0);
        assert_eq!(Opcode::Ret.operand_count(), 0);
        assert_eq!(Opcode::Prn.operand_count(), 1);
        assert_eq!(Opcode::Not.operand_count(), 1);
        assert_eq!(Opcode::Call.operand_count(), 1);
        assert_eq!(Opcode::Ldi.operand_count(), 2);
        assert_eq!(Opcode::Add.operand_count(), 2);
        assert_eq!(Opcode::St.operand_count(), 2);
    }

    #[test]
    fn test_direct_pc_set() {
        assert!(Opcode::Call.sets_pc());
        assert!(Opcode::Ret.sets_pc());
        assert!(Opcode::Jmp.sets_pc());
        assert!(Opcode::Jeq.sets_pc());
        assert!(Opcode::Jne.sets_pc());
        assert!(!Opcode::Ldi.sets_pc());
        assert!(!Opcode::Push.sets_pc());
        assert!(!Opcode::Add.sets_pc());
        assert!(!Opcode::Hlt.sets_pc());
    }

    #[test]
    fn test_illegal_byte() {
        assert!(matches!(
            Opcode::from_byte(0xff, 0x20),
            Err(Ls8Error::IllegalInstruction {
                byte: 0xff,
                pc: 0x20
            })
        ));
    }
}

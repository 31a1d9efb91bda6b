use crate::errors::Ls8Error;
use crate::instruction::Opcode;
use crate::memory::{Memory, MEM_SIZE};
use crate::output::Output;
use crate::timer::Clock;
use std::io::BufRead;

/// register reserved as the stack pointer
const SP: usize = 7;
/// register reserved as the interrupt status bitmask
const IS: usize = 6;
/// register reserved as the interrupt mask bitmask
const IM: usize = 5;

/// where the stack pointer starts; the stack grows downward from here
const SP_INIT: u8 = 0xf4;

/// comparison flag bits; the rest of the flags register is reserved
const FL_LT: u8 = 1 << 5;
const FL_GT: u8 = 1 << 6;
const FL_EQ: u8 = 1 << 7;

/// the interrupt vector table hangs off the top of memory: the slot
/// for line `n` is at IVT_TOP - (8 - n)
const IVT_TOP: u8 = 0xff;

/// interrupt line driven by the periodic timer
const INT_TIMER: u8 = 0;

/// what one dispatched instruction means for the run loop
enum Step {
    Continue,
    Halt,
}

/// The LS-8 machine: 256 bytes of RAM, eight byte-wide registers, a
/// flags register and a program counter, driven by a fetch-decode-
/// execute loop with a polled timer interrupt.
///
/// Execution is single-threaded and synchronous; one instruction
/// completes (interrupt poll included) before the next begins. The
/// machine borrows its clock and output sink mutably, so it cannot be
/// shared across threads without external synchronization.
pub struct Cpu<'a> {
    memory: Memory,
    reg: [u8; 8],
    fl: u8,
    pc: usize,
    clock: &'a mut dyn Clock,
    output: &'a mut dyn Output,
}

impl<'a> Cpu<'a> {
    pub fn new(clock: &'a mut dyn Clock, output: &'a mut dyn Output) -> Cpu<'a> {
        let mut reg = [0u8; 8];
        reg[SP] = SP_INIT;
        Cpu {
            memory: Memory::new(),
            reg,
            fl: 0,
            pc: 0,
            clock,
            output,
        }
    }

    /// load an `.ls8` text image at address 0
    pub fn load_program(&mut self, reader: &mut impl BufRead) -> Result<(), Ls8Error> {
        self.memory.load_program(reader)
    }

    /// run until HLT, a fatal condition, or the program counter walks
    /// off the end of memory
    pub fn run(&mut self) -> Result<(), Ls8Error> {
        while self.pc < MEM_SIZE {
            self.check_interrupts()?;
            self.trace();
            if let Step::Halt = self.step()? {
                break;
            }
        }
        Ok(())
    }

    /// fetch, decode and execute one instruction
    fn step(&mut self) -> Result<Step, Ls8Error> {
        let byte = self.memory.read(self.pc as u8);
        let op = Opcode::from_byte(byte, self.pc)?;

        // operands are fetched up front whether or not this particular
        // instruction uses them
        let operand_a = self.memory.read((self.pc as u8).wrapping_add(1));
        let operand_b = self.memory.read((self.pc as u8).wrapping_add(2));

        match op {
            Opcode::Hlt => return Ok(Step::Halt),
            Opcode::Ldi => {
                let r = self.reg_index(operand_a)?;
                self.reg[r] = operand_b;
            }
            Opcode::Prn => {
                let r = self.reg_index(operand_a)?;
                self.output.print_num(self.reg[r])?;
            }
            Opcode::Pra => {
                let r = self.reg_index(operand_a)?;
                self.output.print_char(self.reg[r])?;
            }
            Opcode::St => {
                let a = self.reg_index(operand_a)?;
                let b = self.reg_index(operand_b)?;
                self.memory.write(self.reg[a], self.reg[b]);
            }
            Opcode::Push => {
                let r = self.reg_index(operand_a)?;
                let value = self.reg[r];
                self.push(value)?;
            }
            Opcode::Pop => {
                let r = self.reg_index(operand_a)?;
                self.reg[r] = self.pop()?;
            }
            Opcode::Call => {
                let r = self.reg_index(operand_a)?;
                // return address is the instruction after the CALL
                self.push((self.pc as u8).wrapping_add(2))?;
                self.pc = self.reg[r] as usize;
            }
            Opcode::Ret => {
                self.pc = self.pop()? as usize;
            }
            Opcode::Jmp => {
                let r = self.reg_index(operand_a)?;
                self.pc = self.reg[r] as usize;
            }
            Opcode::Jeq => {
                let r = self.reg_index(operand_a)?;
                if self.fl & FL_EQ != 0 {
                    self.pc = self.reg[r] as usize;
                } else {
                    self.pc += 1 + op.operand_count();
                }
            }
            Opcode::Jne => {
                let r = self.reg_index(operand_a)?;
                if self.fl & FL_EQ == 0 {
                    self.pc = self.reg[r] as usize;
                } else {
                    self.pc += 1 + op.operand_count();
                }
            }
            Opcode::Add
            | Opcode::Mul
            | Opcode::Mod
            | Opcode::Cmp
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Shl
            | Opcode::Shr
            | Opcode::Not
            | Opcode::Inc
            | Opcode::Dec => self.alu(op, operand_a, operand_b)?,
        }

        if !op.sets_pc() {
            self.pc += 1 + op.operand_count();
        }
        Ok(Step::Continue)
    }

    /// arithmetic/logic on register values; CMP is the only operation
    /// that touches the flags register
    fn alu(&mut self, op: Opcode, operand_a: u8, operand_b: u8) -> Result<(), Ls8Error> {
        let a = self.reg_index(operand_a)?;
        match op {
            Opcode::Not => self.reg[a] = !self.reg[a],
            Opcode::Inc => self.reg[a] = self.reg[a].wrapping_add(1),
            Opcode::Dec => self.reg[a] = self.reg[a].wrapping_sub(1),
            _ => {
                let b = self.reg_index(operand_b)?;
                match op {
                    Opcode::Add => self.reg[a] = self.reg[a].wrapping_add(self.reg[b]),
                    Opcode::Mul => self.reg[a] = self.reg[a].wrapping_mul(self.reg[b]),
                    Opcode::Mod => {
                        // the check is on the register's value, not its
                        // index
                        if self.reg[b] == 0 {
                            return Err(Ls8Error::DivideByZero { pc: self.pc });
                        }
                        self.reg[a] %= self.reg[b];
                    }
                    Opcode::And => self.reg[a] &= self.reg[b],
                    Opcode::Or => self.reg[a] |= self.reg[b],
                    Opcode::Xor => self.reg[a] ^= self.reg[b],
                    Opcode::Shl => {
                        self.reg[a] = self.reg[a].checked_shl(self.reg[b] as u32).unwrap_or(0)
                    }
                    Opcode::Shr => {
                        self.reg[a] = self.reg[a].checked_shr(self.reg[b] as u32).unwrap_or(0)
                    }
                    Opcode::Cmp => {
                        // NB. stale comparison bits are left in place,
                        //     matching the original machine
                        use std::cmp::Ordering;
                        self.fl |= match self.reg[a].cmp(&self.reg[b]) {
                            Ordering::Less => FL_LT,
                            Ordering::Greater => FL_GT,
                            Ordering::Equal => FL_EQ,
                        };
                    }
                    _ => return Err(Ls8Error::UnsupportedAlu(op.mnemonic())),
                }
            }
        }
        Ok(())
    }

    /// poll the timer and dispatch at most one pending, unmasked
    /// interrupt line (lowest line number wins)
    fn check_interrupts(&mut self) -> Result<(), Ls8Error> {
        if self.clock.tick_elapsed() {
            self.reg[IS] |= 1 << INT_TIMER;
        }
        if self.reg[IS] == 0 {
            return Ok(());
        }
        let masked = self.reg[IM] & self.reg[IS];
        for line in 0..8u8 {
            if masked & (1 << line) != 0 {
                self.reg[IS] = 0;
                self.push(self.pc as u8)?;
                self.push(self.fl)?;
                for r in 0..=IS {
                    let value = self.reg[r];
                    self.push(value)?;
                }
                let vector = IVT_TOP - (8 - line);
                self.pc = self.memory.read(vector) as usize;
                log::debug!("interrupt line {} vectored to {:#04x}", line, self.pc);
                break;
            }
        }
        Ok(())
    }

    /// decrement the stack pointer, then store
    fn push(&mut self, value: u8) -> Result<(), Ls8Error> {
        if self.reg[SP] == 0 {
            return Err(Ls8Error::StackOverflow { pc: self.pc });
        }
        self.reg[SP] -= 1;
        self.memory.write(self.reg[SP], value);
        Ok(())
    }

    /// load from the stack pointer, then increment it
    fn pop(&mut self) -> Result<u8, Ls8Error> {
        if self.reg[SP] == 0xff {
            return Err(Ls8Error::StackUnderflow { pc: self.pc });
        }
        let value = self.memory.read(self.reg[SP]);
        self.reg[SP] += 1;
        Ok(value)
    }

    fn reg_index(&self, operand: u8) -> Result<usize, Ls8Error> {
        if (operand as usize) < self.reg.len() {
            Ok(operand as usize)
        } else {
            Err(Ls8Error::BadRegister {
                index: operand,
                pc: self.pc,
            })
        }
    }

    /// dump the program counter, the next three memory bytes and the
    /// register file; emitted once per loop iteration at trace level
    fn trace(&self) {
        let pc = self.pc as u8;
        log::trace!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} | {:02X} {:02X} {:02X} {:02X} {:02X} {:02X} {:02X} {:02X}",
            pc,
            self.memory.read(pc),
            self.memory.read(pc.wrapping_add(1)),
            self.memory.read(pc.wrapping_add(2)),
            self.reg[0],
            self.reg[1],
            self.reg[2],
            self.reg[3],
            self.reg[4],
            self.reg[5],
            self.reg[6],
            self.reg[7],
        );
    }
}

///
/// ## Design
///
/// * LS-8: 256 bytes of RAM, eight byte-wide registers, downward stack
/// * machine state is one owned struct, passed by exclusive reference
///   into the run loop; no globals
/// * opcodes decode once into an enum; operand count and the
///   "sets the pc itself" property come off the encoding in one place
/// * HLT is a normal return from run(), never a process exit inside
///   the core; the driver maps results to exit codes
/// * "interrupts" are cooperative: a Clock is polled once per loop
///   iteration and a timer tick raises line 0; pending & masked lines
///   vector through the table at the top of memory
///    - there is no return-from-interrupt opcode; handlers that want
///      to resume must unwind the pushed state themselves
/// * traits at the seams so tests don't need a terminal or a wall
///   clock:
///    - Clock (WallClock / ManualClock)
///    - Output (StdOutput / Captured) for PRN and PRA
///
/// Model
///
/// main
///  |-- clock, output, cpu(clock, output)
///  |-- cpu.load_program(file)
///  `-- cpu.run()
///       |-- check interrupts (poll clock, maybe vector)
///       |-- trace (log only)
///       `-- fetch, decode, execute; repeat until HLT or the pc
///           walks off the end of memory
pub mod cpu;
pub mod errors;
pub mod instruction;
pub mod memory;
pub mod output;
pub mod timer;

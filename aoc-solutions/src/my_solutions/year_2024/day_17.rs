use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 17, tags = ["vm"])]
pub struct Solver;

/// Upper bound on executed instructions before a run counts as diverging
const MAX_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Literal(u64),
    Register(Register),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `A = A >> combo`
    Adv(Operand),
    Bxl(u64),
    Bst(Operand),
    /// Jump to a program offset when `A != 0`
    Jnz(u64),
    Bxc,
    Out(Operand),
    Bdv(Operand),
    Cdv(Operand),
}

fn combo(value: u64) -> anyhow::Result<Operand> {
    Ok(match value {
        0..=3 => Operand::Literal(value),
        4 => Operand::Register(Register::A),
        5 => Operand::Register(Register::B),
        6 => Operand::Register(Register::C),
        _ => return Err(anyhow!("invalid combo operand {value}")),
    })
}

impl Instruction {
    fn decode(opcode: u64, operand: u64) -> anyhow::Result<Self> {
        Ok(match opcode {
            0 => Instruction::Adv(combo(operand)?),
            1 => Instruction::Bxl(operand),
            2 => Instruction::Bst(combo(operand)?),
            3 => Instruction::Jnz(operand),
            4 => Instruction::Bxc,
            5 => Instruction::Out(combo(operand)?),
            6 => Instruction::Bdv(combo(operand)?),
            7 => Instruction::Cdv(combo(operand)?),
            _ => return Err(anyhow!("invalid opcode {opcode}")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    registers: [u64; 3],
    /// Raw 3-bit words, compared against the output when searching for a quine
    words: Vec<u64>,
    instructions: Vec<Instruction>,
}

struct Machine<'p> {
    registers: [u64; 3],
    instructions: &'p [Instruction],
    ip: usize,
}

impl Machine<'_> {
    fn read(&self, operand: Operand) -> u64 {
        match operand {
            Operand::Literal(value) => value,
            Operand::Register(r) => self.registers[r as usize],
        }
    }

    fn shifted_a(&self, operand: Operand) -> u64 {
        u32::try_from(self.read(operand))
            .ok()
            .and_then(|shift| self.registers[0].checked_shr(shift))
            .unwrap_or(0)
    }

    /// Run to completion, collecting the `out` values.
    fn run(&mut self) -> Result<Vec<u64>, SolveError> {
        let mut output = Vec::new();
        for _ in 0..MAX_STEPS {
            let Some(&instruction) = self.instructions.get(self.ip) else {
                return Ok(output);
            };
            self.ip += 1;
            match instruction {
                Instruction::Adv(op) => self.registers[0] = self.shifted_a(op),
                Instruction::Bxl(value) => self.registers[1] ^= value,
                Instruction::Bst(op) => self.registers[1] = self.read(op) % 8,
                Instruction::Jnz(target) => {
                    if self.registers[0] != 0 {
                        if target % 2 != 0 {
                            return Err(SolveError::SolveFailed(
                                format!("jump into the middle of an instruction ({target})").into(),
                            ));
                        }
                        self.ip = (target / 2) as usize;
                    }
                }
                Instruction::Bxc => self.registers[1] ^= self.registers[2],
                Instruction::Out(op) => output.push(self.read(op) % 8),
                Instruction::Bdv(op) => self.registers[1] = self.shifted_a(op),
                Instruction::Cdv(op) => self.registers[2] = self.shifted_a(op),
            }
        }
        Err(SolveError::NoSolution(format!(
            "program still running after {MAX_STEPS} instructions"
        )))
    }
}

impl Program {
    pub fn run_with_a(&self, a: u64) -> Result<Vec<u64>, SolveError> {
        Machine {
            registers: [a, self.registers[1], self.registers[2]],
            instructions: &self.instructions,
            ip: 0,
        }
        .run()
    }

    /// Smallest positive A for which the program prints its own words.
    ///
    /// Assumes the program consumes three bits of A per output word, so the
    /// last word depends only on the top bits. A is built from the most
    /// significant octal digit down, keeping every prefix whose output
    /// matches the tail of the program.
    pub fn quine_a(&self) -> Result<Option<u64>, SolveError> {
        let mut candidates = vec![0u64];
        for start in (0..self.words.len()).rev() {
            let tail = &self.words[start..];
            let mut next = Vec::new();
            for &prefix in &candidates {
                for digit in 0..8 {
                    let a = prefix << 3 | digit;
                    if self.run_with_a(a)? == tail {
                        next.push(a);
                    }
                }
            }
            candidates = next;
        }
        Ok(candidates.into_iter().filter(|&a| a > 0).min())
    }
}

fn parse_program(input: &str) -> anyhow::Result<Program> {
    let mut registers = [0u64; 3];
    let mut words = None;
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = line.strip_prefix("Register ") {
            let (name, value) = rest
                .split_once(':')
                .ok_or_else(|| anyhow!("malformed register line {line:?}"))?;
            let slot = match name {
                "A" => 0,
                "B" => 1,
                "C" => 2,
                _ => return Err(anyhow!("unknown register {name:?}")),
            };
            registers[slot] = value.trim().parse().with_context(|| format!("register {name}"))?;
        } else if let Some(rest) = line.strip_prefix("Program:") {
            words = Some(
                rest.split(',')
                    .map(|w| {
                        let w = w.trim();
                        w.parse::<u64>()
                            .ok()
                            .filter(|&v| v < 8)
                            .ok_or_else(|| anyhow!("program word {w:?} is not a 3-bit number"))
                    })
                    .collect::<anyhow::Result<Vec<u64>>>()?,
            );
        } else {
            return Err(anyhow!("unexpected line {line:?}"));
        }
    }

    let words = words.ok_or_else(|| anyhow!("missing program"))?;
    if words.len() % 2 != 0 {
        return Err(anyhow!("program has an opcode without operand"));
    }
    let instructions = words
        .chunks_exact(2)
        .map(|pair| Instruction::decode(pair[0], pair[1]))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Program {
        registers,
        words,
        instructions,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Program;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_program(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.run_with_a(shared.registers[0])?.iter().join(","))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .quine_a()?
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::NoSolution("no register A value reproduces the program".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    fn program(a: u64, b: u64, c: u64, words: &str) -> String {
        format!("Register A: {a}\nRegister B: {b}\nRegister C: {c}\n\nProgram: {words}\n")
    }

    fn registers_after(a: u64, b: u64, c: u64, words: &str) -> [u64; 3] {
        let program = Solver::parse(&program(a, b, c, words)).unwrap();
        let mut machine = Machine {
            registers: program.registers,
            instructions: &program.instructions,
            ip: 0,
        };
        machine.run().unwrap();
        machine.registers
    }

    #[test]
    fn test_sample_output() {
        let mut shared = Solver::parse(&program(729, 0, 0, "0,1,5,4,3,0")).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4,6,3,5,6,3,5,2,1,0");
    }

    #[test]
    fn test_small_programs() {
        assert_eq!(registers_after(0, 0, 9, "2,6")[1], 1);
        assert_eq!(registers_after(0, 29, 0, "1,7")[1], 26);
        assert_eq!(registers_after(0, 2024, 43690, "4,0")[1], 44354);

        let shared = Solver::parse(&program(10, 0, 0, "5,0,5,1,5,4")).unwrap();
        assert_eq!(shared.run_with_a(10).unwrap(), vec![0, 1, 2]);

        let shared = Solver::parse(&program(2024, 0, 0, "0,1,5,4,3,0")).unwrap();
        assert_eq!(
            shared.run_with_a(2024).unwrap(),
            vec![4, 2, 5, 6, 7, 7, 7, 7, 3, 1, 0]
        );
    }

    #[test]
    fn test_quine_sample() {
        let mut shared = Solver::parse(&program(2024, 0, 0, "0,3,5,4,3,0")).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "117440");
        assert_eq!(shared.run_with_a(117440).unwrap(), shared.words);
    }

    #[test]
    fn test_combo_seven_rejected() {
        assert!(Solver::parse(&program(1, 0, 0, "0,7")).is_err());
        // literal operands may be 7
        assert!(Solver::parse(&program(1, 0, 0, "1,7")).is_ok());
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(Solver::parse(&program(1, 0, 0, "0,1,5")).is_err());
    }

    #[test]
    fn test_endless_loop_reported() {
        let mut shared = Solver::parse(&program(1, 0, 0, "3,0")).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 1),
            Err(SolveError::NoSolution(_))
        ));
    }
}

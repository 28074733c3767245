//! Main Execution Step.
//!
//! This module implements the single-instruction primitive shared by `run` and
//! `step`. It performs the following:
//! 1. **Fetch/Decode:** Reads the word at `pc` and splits it into fields.
//! 2. **Execute:** Computes the result, the next pc and any memory access.
//! 3. **Commit:** Writes `rd` and `pc` only after every check has passed, so a
//!    failing instruction leaves registers and pc untouched.
//! 4. **Observability:** Updates statistics, notifies the observer and traces the retired instruction.

use super::Cpu;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::data::MemWidth;
use crate::common::error::SimError;
use crate::core::observer::ExecutionObserver;
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv64i::{funct3, funct7, opcodes};

/// Control transfer performed by a retired instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Sequential execution or a plain branch/jump.
    None,
    /// `jal`/`jalr` that wrote a link register.
    Call {
        /// Jump target.
        target: u64,
    },
    /// `jalr` with `rd == x0`.
    Return {
        /// Jump target.
        target: u64,
    },
}

/// Summary of one retired instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Address of the instruction.
    pub pc: u64,
    /// Raw encoding.
    pub word: u32,
    /// Program counter after the instruction.
    pub next_pc: u64,
    /// Call/return classification.
    pub transfer: Transfer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Class {
    Alu,
    Load,
    Store,
    Branch { taken: bool },
    Jump,
}

/// Computed but not yet committed effects of an instruction.
struct Effect {
    rd_val: Option<u64>,
    next_pc: u64,
    class: Class,
    transfer: Transfer,
}

impl Cpu {
    /// Executes the instruction at `pc`.
    ///
    /// Returns `Ok(None)` without touching any state when `pc` is past the
    /// loaded program.
    ///
    /// # Errors
    ///
    /// * `SimError::IllegalInstruction` for encodings outside RV64I.
    /// * `SimError::MemoryBounds` for loads/stores outside the data region.
    /// * `SimError::MisalignedFetch` for a control transfer to a non-word-aligned target.
    pub fn step(
        &mut self,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<Option<Retired>, SimError> {
        let pc = self.pc;
        let Some(word) = self.fetch(pc)? else {
            return Ok(None);
        };
        let d = decode(word);
        let effect = self.execute(pc, &d)?;

        if effect.next_pc % INSTRUCTION_SIZE != 0 {
            return Err(SimError::MisalignedFetch(effect.next_pc));
        }

        if let Some(val) = effect.rd_val {
            self.regs.write(d.rd, val);
        }
        self.pc = effect.next_pc;
        self.count(effect.class);

        tracing::trace!(
            pc = format_args!("{pc:#x}"),
            inst = %disassemble(word),
            next = format_args!("{:#x}", effect.next_pc),
            "retire"
        );

        observer.on_retire(pc, word);
        match effect.transfer {
            Transfer::Call { target } => observer.on_call(pc, target),
            Transfer::Return { target } => observer.on_return(target),
            Transfer::None => {}
        }

        Ok(Some(Retired {
            pc,
            word,
            next_pc: effect.next_pc,
            transfer: effect.transfer,
        }))
    }

    fn execute(&mut self, pc: u64, d: &Decoded) -> Result<Effect, SimError> {
        let illegal = SimError::IllegalInstruction { pc, word: d.raw };
        let fallthrough = pc.wrapping_add(INSTRUCTION_SIZE);
        let rs1 = self.regs.read(d.rs1);
        let rs2 = self.regs.read(d.rs2);
        let imm = d.imm as u64;

        let sequential = |rd_val: Option<u64>, class: Class| Effect {
            rd_val,
            next_pc: fallthrough,
            class,
            transfer: Transfer::None,
        };

        match d.opcode {
            opcodes::OP_REG => {
                let alt = match d.funct7 {
                    funct7::DEFAULT => false,
                    funct7::ALT => true,
                    _ => return Err(illegal),
                };
                let op = AluOp::from_funct3(d.funct3, alt).ok_or(illegal)?;
                Ok(sequential(Some(Alu::execute(op, rs1, rs2)), Class::Alu))
            }

            opcodes::OP_IMM => {
                let (op, b) = match d.funct3 {
                    funct3::SLL => match d.raw.funct6() {
                        funct7::SHIFT_LOGICAL => (AluOp::Sll, u64::from(d.raw.shamt())),
                        _ => return Err(illegal),
                    },
                    funct3::SRL_SRA => match d.raw.funct6() {
                        funct7::SHIFT_LOGICAL => (AluOp::Srl, u64::from(d.raw.shamt())),
                        funct7::SHIFT_ARITH => (AluOp::Sra, u64::from(d.raw.shamt())),
                        _ => return Err(illegal),
                    },
                    f3 => (AluOp::from_funct3(f3, false).ok_or(illegal)?, imm),
                };
                Ok(sequential(Some(Alu::execute(op, rs1, b)), Class::Alu))
            }

            opcodes::OP_LOAD => {
                if d.funct3 > funct3::LWU {
                    return Err(illegal);
                }
                let width = MemWidth::from_funct3(d.funct3);
                let raw = self.load(rs1.wrapping_add(imm), width)?;
                let val = if d.funct3 & 0b100 != 0 {
                    width.zero_extend(raw)
                } else {
                    width.sign_extend(raw)
                };
                Ok(sequential(Some(val), Class::Load))
            }

            opcodes::OP_STORE => {
                if d.funct3 > funct3::SD {
                    return Err(illegal);
                }
                let width = MemWidth::from_funct3(d.funct3);
                self.store(rs1.wrapping_add(imm), width, rs2)?;
                Ok(sequential(None, Class::Store))
            }

            opcodes::OP_LUI => Ok(sequential(Some(imm), Class::Alu)),

            opcodes::OP_BRANCH => {
                let taken = match d.funct3 {
                    funct3::BEQ => rs1 == rs2,
                    funct3::BNE => rs1 != rs2,
                    funct3::BLT => (rs1 as i64) < (rs2 as i64),
                    funct3::BGE => (rs1 as i64) >= (rs2 as i64),
                    funct3::BLTU => rs1 < rs2,
                    funct3::BGEU => rs1 >= rs2,
                    _ => return Err(illegal),
                };
                let next_pc = if taken {
                    pc.wrapping_add(imm)
                } else {
                    fallthrough
                };
                Ok(Effect {
                    rd_val: None,
                    next_pc,
                    class: Class::Branch { taken },
                    transfer: Transfer::None,
                })
            }

            opcodes::OP_JAL => {
                let target = pc.wrapping_add(imm);
                Ok(Effect {
                    rd_val: Some(fallthrough),
                    next_pc: target,
                    class: Class::Jump,
                    transfer: if d.rd != 0 {
                        Transfer::Call { target }
                    } else {
                        Transfer::None
                    },
                })
            }

            opcodes::OP_JALR => {
                if d.funct3 != funct3::JALR {
                    return Err(illegal);
                }
                // rs1 was read above, before rd is written.
                let target = rs1.wrapping_add(imm) & !1;
                Ok(Effect {
                    rd_val: Some(fallthrough),
                    next_pc: target,
                    class: Class::Jump,
                    transfer: if d.rd != 0 {
                        Transfer::Call { target }
                    } else {
                        Transfer::Return { target }
                    },
                })
            }

            _ => Err(illegal),
        }
    }

    fn count(&mut self, class: Class) {
        let stats = &mut self.stats;
        stats.instructions_retired += 1;
        match class {
            Class::Alu => stats.inst_alu += 1,
            Class::Load => stats.inst_load += 1,
            Class::Store => stats.inst_store += 1,
            Class::Branch { taken } => {
                stats.inst_branch += 1;
                if taken {
                    stats.branches_taken += 1;
                }
            }
            Class::Jump => stats.inst_jump += 1,
        }
    }
}

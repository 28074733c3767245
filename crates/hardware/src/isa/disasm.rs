//! Instruction Disassembler for RV64I.
//!
//! Converts a 32-bit instruction encoding into canonical assembly text for
//! trace logging and encode/decode round-trip checks. Registers are printed
//! in numeric form and branch/jump targets as signed byte offsets.
//!
//! # Usage
//!
//! ```
//! use rvlab_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00293), "addi x5, x0, 10");
//! assert_eq!(disassemble(0x003100B3), "add x1, x2, x3");
//! ```

use crate::isa::decode::{b_imm, i_imm, j_imm, s_imm};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv64i::{funct3 as f3, funct7 as f7, opcodes as op};

/// Disassembles a 32-bit instruction.
///
/// Returns `unknown 0x........` for encodings outside the supported subset.
pub fn disassemble(inst: u32) -> String {
    let rd = inst.rd();
    let rs1 = inst.rs1();
    let rs2 = inst.rs2();

    let text = match inst.opcode() {
        op::OP_REG => reg_mnemonic(inst.funct3(), inst.funct7())
            .map(|mn| format!("{mn} x{rd}, x{rs1}, x{rs2}")),

        op::OP_IMM => match inst.funct3() {
            f3::SLL | f3::SRL_SRA => shift_mnemonic(inst.funct3(), inst.funct6())
                .map(|mn| format!("{mn} x{rd}, x{rs1}, {}", inst.shamt())),
            funct3 => imm_mnemonic(funct3)
                .map(|mn| format!("{mn} x{rd}, x{rs1}, {}", i_imm(inst))),
        },

        op::OP_LOAD => load_mnemonic(inst.funct3())
            .map(|mn| format!("{mn} x{rd}, {}(x{rs1})", i_imm(inst))),

        op::OP_STORE => store_mnemonic(inst.funct3())
            .map(|mn| format!("{mn} x{rs2}, {}(x{rs1})", s_imm(inst))),

        op::OP_BRANCH => branch_mnemonic(inst.funct3())
            .map(|mn| format!("{mn} x{rs1}, x{rs2}, {}", b_imm(inst))),

        op::OP_JAL => Some(format!("jal x{rd}, {}", j_imm(inst))),

        op::OP_JALR if inst.funct3() == f3::JALR => {
            Some(format!("jalr x{rd}, {}(x{rs1})", i_imm(inst)))
        }

        op::OP_LUI => Some(format!("lui x{rd}, {:#x}", inst >> 12)),

        _ => None,
    };

    text.unwrap_or_else(|| format!("unknown {inst:#010x}"))
}

const fn reg_mnemonic(funct3: u32, funct7: u32) -> Option<&'static str> {
    Some(match (funct3, funct7) {
        (f3::ADD_SUB, f7::DEFAULT) => "add",
        (f3::ADD_SUB, f7::ALT) => "sub",
        (f3::SLL, f7::DEFAULT) => "sll",
        (f3::SLT, f7::DEFAULT) => "slt",
        (f3::SLTU, f7::DEFAULT) => "sltu",
        (f3::XOR, f7::DEFAULT) => "xor",
        (f3::SRL_SRA, f7::DEFAULT) => "srl",
        (f3::SRL_SRA, f7::ALT) => "sra",
        (f3::OR, f7::DEFAULT) => "or",
        (f3::AND, f7::DEFAULT) => "and",
        _ => return None,
    })
}

const fn shift_mnemonic(funct3: u32, funct6: u32) -> Option<&'static str> {
    match (funct3, funct6) {
        (f3::SLL, f7::SHIFT_LOGICAL) => Some("slli"),
        (f3::SRL_SRA, f7::SHIFT_LOGICAL) => Some("srli"),
        (f3::SRL_SRA, f7::SHIFT_ARITH) => Some("srai"),
        _ => None,
    }
}

const fn imm_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        f3::ADD_SUB => Some("addi"),
        f3::SLT => Some("slti"),
        f3::SLTU => Some("sltiu"),
        f3::XOR => Some("xori"),
        f3::OR => Some("ori"),
        f3::AND => Some("andi"),
        _ => None,
    }
}

const fn load_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        f3::LB => Some("lb"),
        f3::LH => Some("lh"),
        f3::LW => Some("lw"),
        f3::LD => Some("ld"),
        f3::LBU => Some("lbu"),
        f3::LHU => Some("lhu"),
        f3::LWU => Some("lwu"),
        _ => None,
    }
}

const fn store_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        f3::SB => Some("sb"),
        f3::SH => Some("sh"),
        f3::SW => Some("sw"),
        f3::SD => Some("sd"),
        _ => None,
    }
}

const fn branch_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        f3::BEQ => Some("beq"),
        f3::BNE => Some("bne"),
        f3::BLT => Some("blt"),
        f3::BGE => Some("bge"),
        f3::BLTU => Some("bltu"),
        f3::BGEU => Some("bgeu"),
        _ => None,
    }
}

//! Interactive initialization sequence.
//!
//! Asks for the department count, each department's beds and equipment,
//! the corridors and the central department, in that order. Department
//! numbers are typed 1-based and converted to 0-based here.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use medroute_logic::constants::{max_edges, MAX_DEPARTMENTS, MIN_DEPARTMENTS, MIN_EDGE_WEIGHT};
use medroute_logic::department::Department;
use medroute_logic::graph::Corridor;
use medroute_logic::scenario::SessionSetup;

use crate::prompt::Prompter;

/// Unwrap a prompt result, failing if the input ended mid-setup.
fn required<T>(value: io::Result<Option<T>>) -> Result<T> {
    match value? {
        Some(v) => Ok(v),
        None => bail!("input ended before setup was complete"),
    }
}

pub fn prompt_setup<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    max_patients: Option<usize>,
) -> Result<SessionSetup> {
    let count = required(prompter.read_usize(
        "Enter the number of departments: ",
        MIN_DEPARTMENTS,
        MAX_DEPARTMENTS,
    ))?;

    let mut departments = Vec::with_capacity(count);
    for i in 0..count {
        let beds = required(prompter.read_u32(
            &format!("Enter the number of beds in department {}: ", i + 1),
            0,
            u32::MAX,
        ))?;
        let equipment = required(prompter.read_u32(
            &format!("Enter the number of equipment in department {}: ", i + 1),
            0,
            u32::MAX,
        ))?;
        departments.push(Department::new(beds, equipment));
    }

    let edge_count = required(prompter.read_usize(
        "Enter the number of edges: ",
        0,
        max_edges(count),
    ))?;

    let mut edges = Vec::with_capacity(edge_count);
    while edges.len() < edge_count {
        let a = required(prompter.read_usize(
            "Enter edge start department (1-based): ",
            1,
            count,
        ))?;
        let b = required(prompter.read_usize(
            "Enter edge end department (1-based): ",
            1,
            count,
        ))?;
        if a == b {
            writeln!(
                prompter.output(),
                "An edge must connect two different departments."
            )?;
            continue;
        }
        let distance = required(prompter.read_u32(
            "Enter distance between departments: ",
            MIN_EDGE_WEIGHT,
            u32::MAX,
        ))?;
        edges.push(Corridor {
            a: a - 1,
            b: b - 1,
            distance,
        });
    }

    let central = required(prompter.read_usize(
        "Enter the central department (1-based): ",
        1,
        count,
    ))?;

    log::debug!(
        "interactive setup: {} departments, {} edges, central {}",
        count,
        edges.len(),
        central
    );

    Ok(SessionSetup {
        departments,
        edges,
        central: central - 1,
        max_patients,
    })
}

//! The numbered menu loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use medroute_logic::session::{Command, Outcome, Session};

use crate::prompt::Prompter;
use crate::render;

/// Ask which action to run next and collect its parameters.
/// `Ok(None)` means the input ended.
fn next_command<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    departments: usize,
) -> Result<Option<Command>> {
    loop {
        write!(prompter.output(), "{}", render::MENU)?;
        let Some(choice) = prompter.read_choice("Enter your choice: ")? else {
            return Ok(None);
        };
        let command = match choice {
            Some(1) => Command::Equalize,
            Some(2) => {
                let Some(from) = prompter.read_usize(
                    "Enter source department (1-based): ",
                    1,
                    departments,
                )?
                else {
                    return Ok(None);
                };
                let Some(to) = prompter.read_usize(
                    "Enter destination department (1-based): ",
                    1,
                    departments,
                )?
                else {
                    return Ok(None);
                };
                Command::Transfer {
                    from: from - 1,
                    to: to - 1,
                }
            }
            Some(3) => {
                writeln!(prompter.output(), "\nPatient Entry:")?;
                let Some(name) = prompter.read_text("Enter patient name: ")? else {
                    return Ok(None);
                };
                Command::Admit { name }
            }
            Some(4) => Command::ListPatients,
            Some(5) => {
                let Some(name) = prompter.read_text("Enter the name of the patient to depart: ")?
                else {
                    return Ok(None);
                };
                Command::Discharge { name }
            }
            Some(6) => Command::ShowDepartments,
            Some(7) => Command::Exit,
            Some(8) => Command::SpanningTree,
            _ => {
                writeln!(prompter.output(), "Invalid option. Please try again.")?;
                continue;
            }
        };
        return Ok(Some(command));
    }
}

/// Run menu actions against `session` until the operator exits or the
/// input ends. Domain failures are reported and the loop continues; only
/// fatal errors end it early.
pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session,
) -> Result<()> {
    loop {
        let Some(command) = next_command(prompter, session.departments().len())? else {
            writeln!(prompter.output(), "\nInput closed. Exiting...")?;
            return Ok(());
        };

        let text = match session.execute(command) {
            Ok(Outcome::Exit) => {
                writeln!(prompter.output(), "Exiting...")?;
                return Ok(());
            }
            Ok(Outcome::Equalized(report)) => render::equalized(&report, session.departments()),
            Ok(Outcome::Transferred(report)) => render::transferred(&report),
            Ok(Outcome::Admitted(admission)) => render::admitted(&admission),
            Ok(Outcome::Patients(patients)) => render::patients(&patients),
            Ok(Outcome::Discharged(discharge)) => render::discharged(&discharge),
            Ok(Outcome::Departments {
                departments,
                totals,
            }) => render::departments(&departments, totals),
            Ok(Outcome::SpanningTree(tree)) => render::spanning_tree(&tree),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) if e.is_domain_failure() => render::failure(&e),
            Err(e) => {
                log::error!("Menu action failed: {}", e);
                render::failure(&e)
            }
        };
        write!(prompter.output(), "{}", text)?;
    }
}

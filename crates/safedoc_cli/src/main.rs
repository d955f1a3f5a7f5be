//! `safedoc` - command-line host for the safety-form core.
//!
//! # Responsibility
//! - Map subcommands onto `DocumentService` use-cases.
//! - Keep stdout output plain and line-oriented for scripting.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Command, EmergencyCommand, EmployeeCommand, ExportArgs, ToggleArgs};
use log::info;
use safedoc_core::model::activity::ActivityRiskAnalysis;
use safedoc_core::model::checklist::Checklist;
use safedoc_core::model::employee::Employee;
use safedoc_core::model::lockout::LockoutMatrix;
use safedoc_core::risk::registry::risks;
use safedoc_core::{
    export_document, init_logging, open_db, Collection, DocumentService,
    EmergencyRiskAnalysis, PlainTextRenderer, Renderable, SqliteDocumentRepository,
};
use std::path::Path;

type Service<'conn> = DocumentService<SqliteDocumentRepository<'conn>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(cli.effective_log_level(), log_dir).context("failed to start logging")?;
    }

    match cli.command {
        Command::Ping => println!("pong={}", safedoc_core::ping()),
        Command::Version => println!("safedoc_core version={}", safedoc_core::core_version()),
        Command::Risks => print_risks(),
        Command::Employee(command) => {
            with_service(&cli.db, |service| handle_employee(service, command))?
        }
        Command::Emergency(command) => {
            with_service(&cli.db, |service| handle_emergency(service, command))?
        }
        Command::Summary => with_service(&cli.db, print_summary)?,
        Command::Export(args) => with_service(&cli.db, |service| handle_export(service, &args))?,
    }
    Ok(())
}

/// Opens the database and runs one command against a fresh service.
fn with_service<T>(
    db: &Path,
    run: impl FnOnce(&Service<'_>) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let conn = open_db(db).with_context(|| format!("failed to open database `{}`", db.display()))?;
    let service = DocumentService::new(SqliteDocumentRepository::try_new(&conn)?);
    info!("event=cli_command module=cli status=start db={}", db.display());
    run(&service)
}

fn print_summary(service: &Service<'_>) -> anyhow::Result<()> {
    let summary = service.summary()?;
    for (collection, count) in &summary.counts {
        println!("{collection}\t{count}");
    }
    println!("total\t{}", summary.total());
    Ok(())
}

fn print_risks() {
    for risk in risks() {
        println!("{}\t{}\t{}", risk.id, risk.quadrant(), risk.text);
    }
}

fn handle_employee(service: &Service<'_>, command: EmployeeCommand) -> anyhow::Result<()> {
    match command {
        EmployeeCommand::Add {
            name,
            registration,
            role,
            phone,
            email,
        } => {
            let employee =
                service.register_employee(&name, &registration, &role, &phone, email.as_deref())?;
            println!("{}", employee.id);
        }
        EmployeeCommand::List => {
            for employee in service.list::<Employee>()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    employee.id, employee.registration, employee.name, employee.role
                );
            }
        }
        EmployeeCommand::Remove { id } => service.delete::<Employee>(id)?,
    }
    Ok(())
}

fn handle_emergency(service: &Service<'_>, command: EmergencyCommand) -> anyhow::Result<()> {
    match command {
        EmergencyCommand::New {
            date,
            time,
            analysis,
            tag,
            om,
        } => {
            let mut form = EmergencyRiskAnalysis::new();
            form.date = date;
            form.time = time;
            form.analysis_360 = analysis;
            form.tag = tag;
            form.om = om;
            service.save(&form)?;
            println!("{}", form.id);
        }
        EmergencyCommand::Toggle(ToggleArgs { id, risk, on, .. }) => {
            let form = service.set_emergency_risk(id, risk, on)?;
            print_maps(&form);
        }
        EmergencyCommand::Sign { id, employee } => {
            let form: EmergencyRiskAnalysis = service.sign_team(id, employee)?;
            println!("team={}", form.team.len());
        }
        EmergencyCommand::Show { id } => {
            let form: EmergencyRiskAnalysis = service.get(id)?;
            print!("{}", PlainTextRenderer.render_to_string(&form.render_view()));
        }
        EmergencyCommand::List => {
            for form in service.list::<EmergencyRiskAnalysis>()? {
                let selected = form
                    .selected_risks()
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                println!("{}\t{} {}\t{}\trisks={selected}", form.id, form.date, form.time, form.tag);
            }
        }
        EmergencyCommand::Delete { id } => service.delete::<EmergencyRiskAnalysis>(id)?,
    }
    Ok(())
}

fn print_maps(form: &EmergencyRiskAnalysis) {
    for (name, map) in [
        ("diagnosis", &form.diagnosis_map),
        ("execution", &form.execution_map),
    ] {
        for (quadrant, text) in map.iter() {
            println!("{name}.{quadrant}={}", text.replace('\n', "|"));
        }
    }
}

fn handle_export(service: &Service<'_>, args: &ExportArgs) -> anyhow::Result<()> {
    let Some(collection) = Collection::parse(&args.collection) else {
        bail!("unknown collection `{}`", args.collection);
    };

    let path = match collection {
        Collection::EmergencyAnalyses => {
            export_stored::<EmergencyRiskAnalysis>(service, args.id, &args.out)?
        }
        Collection::ActivityAnalyses => {
            export_stored::<ActivityRiskAnalysis>(service, args.id, &args.out)?
        }
        Collection::Checklists => export_stored::<Checklist>(service, args.id, &args.out)?,
        Collection::LockoutMatrices => export_stored::<LockoutMatrix>(service, args.id, &args.out)?,
        Collection::Employees | Collection::ArtCertificates => {
            bail!("collection `{collection}` has no printable form")
        }
    };
    println!("{}", path.display());
    Ok(())
}

fn export_stored<D: Renderable>(
    service: &Service<'_>,
    id: uuid::Uuid,
    out: &Path,
) -> anyhow::Result<std::path::PathBuf> {
    let document: D = service.get(id)?;
    export_document(&PlainTextRenderer, &document, out)
        .with_context(|| format!("failed to export into `{}`", out.display()))
}

use multable::form::{FormValues, MessageStyle};
use multable::output::{build_records, render_html};
use multable::session::{Session, SessionSettings};
use multable::tabs::SequentialIds;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(
        SessionSettings {
            tabbed: true,
            message_style: MessageStyle::Aggregated,
            ..SessionSettings::default()
        },
        Box::new(SequentialIds::new()),
    );

    for values in [
        FormValues::new("1", "10", "1", "10"),
        FormValues::new("-5", "5", "5", "-5"),
        FormValues::new("60", "1", "", "x"),
    ] {
        match session.submit(&values) {
            Ok(s) => println!(
                "opened {} {}",
                s.tab.map(|t| t.to_string()).unwrap_or_default(),
                s.title
            ),
            Err(_) => println!("rejected: {}", session.errors().join("; ")),
        }
    }

    let records = build_records(&session);
    std::fs::write("tables.html", render_html(&records))?;
    println!("Tabs: {}", records.len());

    Ok(())
}

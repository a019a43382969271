//! CSV rendering of a resolved field set for the coach-side document
//! tooling. The document renderer itself stays external; this module only
//! hands over the labeled values in a tabular interchange form.

use std::io::Write;

use serde_json::Value;

use super::ResolvedField;

/// Write the scalar fields followed by the indexed liability entries.
pub fn write_export<W: Write>(
    writer: W,
    fields: &[ResolvedField],
    liabilities: &[Vec<ResolvedField>],
) -> Result<(), ::csv::Error> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(["field", "label", "value"])?;

    for field in fields {
        out.write_record([field.name.as_str(), field.label.as_str(), &render(&field.value)])?;
    }

    for (index, entry) in liabilities.iter().enumerate() {
        for field in entry {
            let name = format!("liabilities[{index}].{}", field.name);
            out.write_record([name.as_str(), field.label.as_str(), &render(&field.value)])?;
        }
    }

    out.flush()?;
    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::export::{resolve_field, resolve_liabilities};
    use crate::profile::domain::{Liability, PersonalDetails};
    use crate::profile::store::SectionStore;

    #[test]
    fn export_lists_scalars_then_indexed_liabilities() {
        let mut store = SectionStore::for_personal_id("p-3");
        store.personal_details = Some(PersonalDetails {
            personal_id: "p-3".to_string(),
            first_name: Some("Jonas".to_string()),
            ..PersonalDetails::default()
        });
        store.liabilities = vec![Liability {
            personal_id: "p-3".to_string(),
            lender: Some("Volksbank".to_string()),
            ..Liability::default()
        }];

        let fields = vec![
            resolve_field("firstName", &store),
            resolve_field("unknownField", &store),
        ];
        let liabilities = resolve_liabilities(&store);

        let mut buffer = Vec::new();
        write_export(&mut buffer, &fields, &liabilities).expect("export writes");
        let rendered = String::from_utf8(buffer).expect("utf-8 output");

        assert!(rendered.starts_with("field,label,value\n"));
        assert!(rendered.contains("firstName,First name,Jonas\n"));
        assert!(rendered.contains("unknownField,unknownField,\n"));
        assert!(rendered.contains("liabilities[0].lender,Lender,Volksbank\n"));
    }
}

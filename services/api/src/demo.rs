use std::sync::Arc;

use clap::Args;
use serde_json::{json, Value};

use crate::infra::InMemoryProfileDirectory;
use fincoach::error::AppError;
use fincoach::profile::export::csv::write_export;
use fincoach::profile::wizard::StepData;
use fincoach::profile::{
    FormTemplateCatalog, OnboardingService, ProfileClient, SectionKey, WizardController,
    WizardStep,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Product form to walk through
    #[arg(long, default_value = "immobilien")]
    pub(crate) form_type: String,
    /// Profile identifier used for the seeded demo client
    #[arg(long, default_value = "demo-client")]
    pub(crate) personal_id: String,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directory = Arc::new(InMemoryProfileDirectory::default());
    let service = OnboardingService::new(directory.clone(), FormTemplateCatalog::builtin());

    let personal_id = args.personal_id.as_str();
    seed_profile(&service, personal_id).await?;

    let completion = service.completion(personal_id).await.map_err(|err| {
        AppError::Onboarding(fincoach::profile::OnboardingServiceError::Client(err))
    })?;
    println!(
        "Profile {personal_id}: {}% complete, resume at step {} of {}",
        completion.status.completion_percentage, completion.current_step, completion.step_count
    );

    let template = service.template(&args.form_type)?.clone();
    println!(
        "Walking through '{}' ({} steps)",
        template.form_type,
        template.step_count()
    );

    let mut wizard = WizardController::new(template.clone(), directory.clone());
    if let Ok(user) = directory.fetch_current_user().await {
        wizard.set_auth_user(user);
    }

    for step in &template.required {
        println!("  step {}: {}", wizard.current_step(), step.label());
        match wizard.complete_step(sample_step_data(*step, personal_id)) {
            Ok(_) => {}
            Err(err) => {
                println!("  step rejected: {err}");
                return Ok(());
            }
        }
    }

    match wizard.submit().await {
        Ok(ack) => println!(
            "Submission accepted: {}",
            ack.message.unwrap_or_else(|| "ok".to_string())
        ),
        Err(err) => {
            println!("Submission failed, data kept for retry: {err}");
            return Ok(());
        }
    }
    println!("Recorded submissions: {}", directory.submissions().len());

    let export = service
        .export(
            personal_id,
            &[
                "firstName".to_string(),
                "last_name".to_string(),
                "netIncome".to_string(),
                "taxClass".to_string(),
                "lender".to_string(),
            ],
        )
        .await
        .map_err(|err| {
            AppError::Onboarding(fincoach::profile::OnboardingServiceError::Client(err))
        })?;

    let mut rendered = Vec::new();
    write_export(&mut rendered, &export.fields, &export.liabilities)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
    println!("\nCoach export:\n{}", String::from_utf8_lossy(&rendered));

    Ok(())
}

async fn seed_profile<C: ProfileClient>(
    service: &OnboardingService<C>,
    personal_id: &str,
) -> Result<(), AppError> {
    let sections: [(SectionKey, Value); 3] = [
        (
            SectionKey::PersonalDetails,
            json!({
                "personalId": personal_id,
                "userId": personal_id,
                "firstName": "Anna",
                "lastName": "Keller",
                "birthDate": "1991-04-23",
                "street": "Lindenweg",
                "houseNumber": "12",
                "postalCode": "04109",
                "city": "Leipzig",
                "email": "anna.keller@example.com"
            }),
        ),
        (
            SectionKey::Income,
            json!({
                "personalId": personal_id,
                "grossIncome": 4300.0,
                "netIncome": 2900.0,
                "taxClass": 3
            }),
        ),
        (
            SectionKey::Liabilities,
            json!([{
                "personalId": personal_id,
                "loanType": "consumerLoan",
                "lender": "Sparkasse",
                "remainingBalance": 8400.0,
                "monthlyPayment": 180.0
            }]),
        ),
    ];

    for (kind, payload) in sections {
        service.store_section(kind, personal_id, payload).await?;
    }
    Ok(())
}

fn sample_step_data(step: WizardStep, personal_id: &str) -> StepData {
    let value = match step {
        WizardStep::Section(SectionKey::PersonalDetails) => json!({
            "personalId": personal_id,
            "firstName": "Anna",
            "lastName": "Keller",
            "birthDate": "1991-04-23T00:00:00.000Z"
        }),
        WizardStep::Section(SectionKey::Employment) => json!({
            "personalId": personal_id,
            "occupation": "Controller",
            "employer": "Stadtwerke Leipzig",
            "employmentStatus": "employed"
        }),
        WizardStep::Section(SectionKey::Income) => json!({
            "personalId": personal_id,
            "grossIncome": 4300.0,
            "netIncome": 2900.0,
            "taxClass": 3
        }),
        WizardStep::Section(SectionKey::Expenses) => json!({
            "personalId": personal_id,
            "rent": 860.0,
            "livingExpenses": 650.0
        }),
        WizardStep::Section(SectionKey::Assets) => json!({
            "personalId": personal_id,
            "bankBalance": 14500.0
        }),
        WizardStep::Section(SectionKey::Liabilities) => json!({
            "personalId": personal_id,
            "lender": "Sparkasse",
            "remainingBalance": 8400.0
        }),
        WizardStep::Section(SectionKey::GoalsAndWishes) => json!({
            "personalId": personal_id,
            "primaryGoal": "ownHome",
            "targetAmount": 320000.0
        }),
        WizardStep::Section(SectionKey::RiskAppetite) => json!({
            "personalId": personal_id,
            "riskClass": "balanced"
        }),
        WizardStep::Consent => json!({
            "place": "Leipzig",
            "agreed": true,
            "signature": "data:image/png;base64,iVBORw0KGgo="
        }),
    };

    match value {
        Value::Object(map) => map,
        _ => StepData::new(),
    }
}

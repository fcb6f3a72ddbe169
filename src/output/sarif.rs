use crate::audit::AuditReport;
use crate::metrics::PRIMARY_FILE;
use crate::rules;
use crate::verdict::RuleCode;
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation, Region,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};

pub fn format(report: &AuditReport) -> String {
    let catalogue = rules::rules();

    // The rule table is static, so every descriptor is emitted even when
    // the run has no finding for it.
    let descriptors: Vec<ReportingDescriptor> = catalogue
        .iter()
        .map(|info| {
            let mut rule = ReportingDescriptor::builder()
                .id(info.code.as_str().to_string())
                .build();
            rule.short_description = Some(
                MultiformatMessageString::builder()
                    .text(info.summary.to_string())
                    .build(),
            );
            rule.help = Some(
                MultiformatMessageString::builder()
                    .text(info.remediation.to_string())
                    .build(),
            );
            rule
        })
        .collect();

    let rule_index = |code: RuleCode| -> Option<i64> {
        catalogue
            .iter()
            .position(|info| info.code == code)
            .map(|i| i as i64)
    };

    let primary_file = report.path.join(PRIMARY_FILE);

    let tagged = report
        .verdict
        .blockers
        .iter()
        .map(|f| (f, ResultLevel::Error))
        .chain(
            report
                .verdict
                .warnings
                .iter()
                .map(|f| (f, ResultLevel::Warning)),
        );

    let results: Vec<SarifResult> = tagged
        .map(|(finding, level)| {
            let mut result = SarifResult::builder()
                .message(Message::builder().text(finding.message.clone()).build())
                .build();

            result.rule_id = Some(finding.code.as_str().to_string());
            result.level = Some(level);
            result.rule_index = rule_index(finding.code);

            // B1 concerns sibling files, so it points at the bundle
            // directory; B2 and W1 point at SKILL.md itself.
            let target = if finding.code == RuleCode::B1 {
                &report.path
            } else {
                &primary_file
            };
            let uri = target.to_string_lossy().replace('\\', "/");

            let mut location = Location::builder().build();
            let mut physical = PhysicalLocation::builder().build();
            physical.artifact_location = Some(ArtifactLocation::builder().uri(uri).build());
            if finding.code == RuleCode::B2 {
                // Frontmatter always lives at the top of the file.
                physical.region = Some(Region::builder().start_line(1_i64).build());
            }
            location.physical_location = Some(physical);
            result.locations = Some(vec![location]);

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("skill-auditor")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(descriptors)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed")
}

use serde::Deserialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use dossier_domain::{
	matching::{
		Assignment, AssignmentFailure, AssignmentSnapshot, Confidence, Persona, PersonaMatchReport,
		TargetSpec,
	},
	repair,
};

use crate::{DossierService, Error, Result, offline};

#[derive(Debug, Deserialize)]
struct RawPersonaReport {
	assignments: Vec<RawAssignment>,
	overall_summary: String,
}

#[derive(Debug, Deserialize)]
struct RawAssignment {
	target: String,
	confidence: String,
	justification: String,
}

impl DossierService {
	/// One prompt per persona, so a parse or transport failure for one
	/// persona is recorded in `failures` and never corrupts the others'
	/// results. The finished snapshot replaces the previously persisted one.
	pub async fn run_assignment_match(&self) -> Result<AssignmentSnapshot> {
		let personas = self.store.load_personas()?;
		let targets = self.store.load_targets()?;

		if personas.is_empty() {
			return Err(Error::InvalidRequest {
				message: "No personas found in the persona file.".to_string(),
			});
		}
		if targets.is_empty() {
			return Err(Error::InvalidRequest {
				message: "No targets found in the target file.".to_string(),
			});
		}

		let live = self.live_reasoning();
		let mut reports = Vec::new();
		let mut failures = Vec::new();

		if live {
			for persona in &personas {
				match self.assign_persona(persona, &targets).await {
					Ok(report) => reports.push(report),
					Err(reason) => {
						tracing::warn!(persona = %persona.id, "Assignment matching failed: {reason}.");
						failures.push(AssignmentFailure {
							persona_id: persona.id.clone(),
							persona_name: persona.name.clone(),
							reason,
						});
					},
				}
			}
		} else {
			reports =
				offline::assign(&personas, &targets, self.cfg.matching.max_assignments as usize);
		}

		let snapshot = AssignmentSnapshot {
			persona_count: personas.len(),
			target_count: targets.len(),
			generated_at: OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
			live_reasoning: live,
			reports,
			failures,
		};

		self.store.save_assignment_snapshot(&snapshot)?;

		Ok(snapshot)
	}

	async fn assign_persona(
		&self,
		persona: &Persona,
		targets: &[TargetSpec],
	) -> std::result::Result<PersonaMatchReport, String> {
		let prompt = build_assignment_prompt(persona, targets, self.cfg.matching.max_assignments);
		let raw = self
			.providers
			.reasoning
			.complete(&self.cfg.providers.reasoning, &prompt)
			.await
			.map_err(|err| format!("completion call failed: {err}"))?;
		let parsed: RawPersonaReport = serde_json::from_str(repair::strip_fences(&raw))
			.map_err(|_| "reasoning output is not a valid assignment report".to_string())?;
		let mut assignments = Vec::new();

		for raw_assignment in parsed.assignments {
			// Fabricated targets are dropped silently; an unknown confidence
			// label fails the whole report.
			if !targets.iter().any(|target| target.name == raw_assignment.target) {
				continue;
			}

			let Some(confidence) = Confidence::parse(&raw_assignment.confidence) else {
				return Err(format!("unknown confidence label {:?}", raw_assignment.confidence));
			};

			assignments.push(Assignment {
				target: raw_assignment.target,
				confidence,
				justification: raw_assignment.justification,
			});
		}

		assignments.truncate(self.cfg.matching.max_assignments as usize);

		Ok(PersonaMatchReport {
			persona_id: persona.id.clone(),
			persona_name: persona.name.clone(),
			assignments,
			overall_summary: parsed.overall_summary,
		})
	}
}

fn build_assignment_prompt(
	persona: &Persona,
	targets: &[TargetSpec],
	max_assignments: u32,
) -> String {
	let persona_json = serde_json::to_string_pretty(persona).unwrap_or_default();
	let targets_json = serde_json::to_string_pretty(targets).unwrap_or_default();

	format!(
		"You are a staffing system that pairs one candidate with target projects.\n\n\
		 Candidate:\n{persona_json}\n\n\
		 Targets:\n{targets_json}\n\n\
		 Choose the 1-{max_assignments} best-fit targets for this candidate. Cite \
		 concrete evidence from their skills, domains, or interests and the target \
		 requirements. If a target is a stretch fit, say what support they would \
		 need. Never invent targets that are not listed.\n\n\
		 Return ONLY valid JSON with this exact shape:\n\
		 {{\n\
		   \"assignments\": [\n\
		     {{ \"target\": \"name\", \"confidence\": \"low|medium|high\", \"justification\": \"one sentence\" }}\n\
		   ],\n\
		   \"overall_summary\": \"one paragraph summarizing the fit\"\n\
		 }}"
	)
}

//! Template registry — per-category subject and stage bodies.
//!
//! The registry is a data table keyed by [`Category`]: downstream code is
//! category-agnostic and only ever sees a [`TemplateSet`]. ER&D carries the
//! firm-approved wording verbatim; the other functions carry structurally
//! identical placeholder copy parameterized by their display label, with
//! the same variable contract (`client_name`, `case_code`,
//! `case_manager_name`, `poc_display_name`).

use std::fmt;

use serde::Serialize;

// ── Category ────────────────────────────────────────────────────────

/// Business function selecting which template content applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Erd,
    SupplyChain,
    Procurement,
    Manufacturing,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Erd,
        Category::SupplyChain,
        Category::Procurement,
        Category::Manufacturing,
    ];

    /// Display label, as shown in sheets and subjects.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Erd => "ER&D",
            Category::SupplyChain => "Supply Chain",
            Category::Procurement => "Procurement",
            Category::Manufacturing => "Manufacturing",
        }
    }

    /// Parse a category from its display label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Stage ───────────────────────────────────────────────────────────

/// One of the three escalation emails generated per row, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Initial,
    FollowUp,
    Escalation,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Initial, Stage::FollowUp, Stage::Escalation];

    /// Archive folder for this stage's artifacts.
    pub fn folder(&self) -> &'static str {
        match self {
            Stage::Initial => "1_Sebastian_Initial",
            Stage::FollowUp => "2_POC_Follow_Up",
            Stage::Escalation => "3_Aseem_Escalation",
        }
    }

    /// Who signs this stage's email.
    pub fn signer(&self) -> &'static str {
        match self {
            Stage::Initial => "Sebastian",
            Stage::FollowUp => "POC",
            Stage::Escalation => "Aseem",
        }
    }

    /// Human-readable stage label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Initial => "Sebastian – Initial",
            Stage::FollowUp => "POC – Follow-up",
            Stage::Escalation => "Aseem – Escalation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Template set ────────────────────────────────────────────────────

/// Subject template plus one body template per stage, selected once per run.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Display label of the owning category.
    pub label: String,
    /// Subject template, shared across all three stages.
    pub subject: String,
    /// Body templates in [`Stage::ALL`] order.
    pub bodies: [String; 3],
}

impl TemplateSet {
    /// Look up the template set for a category.
    pub fn for_category(category: Category) -> TemplateSet {
        match category {
            Category::Erd => TemplateSet {
                label: category.label().to_string(),
                subject: SUBJECT_ERD.to_string(),
                bodies: [
                    BODY_INITIAL_ERD.to_string(),
                    BODY_FOLLOW_UP_ERD.to_string(),
                    BODY_ESCALATION_ERD.to_string(),
                ],
            },
            _ => {
                let label = category.label();
                TemplateSet {
                    label: label.to_string(),
                    subject: format!(
                        "{label} Data Collection - {{{{ case_code }}}} ({{{{ client_name }}}})"
                    ),
                    bodies: [
                        placeholder_initial(label),
                        placeholder_follow_up(label),
                        placeholder_escalation(label),
                    ],
                }
            }
        }
    }

    /// Body template for a stage.
    pub fn body(&self, stage: Stage) -> &str {
        match stage {
            Stage::Initial => &self.bodies[0],
            Stage::FollowUp => &self.bodies[1],
            Stage::Escalation => &self.bodies[2],
        }
    }
}

// ── ER&D — firm-approved wording (exact) ────────────────────────────

const SUBJECT_ERD: &str = "ER&D Data Collection - {{ case_code }} ({{ client_name }})";

const BODY_INITIAL_ERD: &str = r#"
<p>Hi {{ case_manager_name }},</p>

<p>Hope you are doing well!</p>

<p>
I am the practice manager for Engineering and R&amp;D and I wanted to reach out regarding your work with <strong>{{ client_name }}</strong> (<strong>{{ case_code }}</strong>). From what we heard your case also included an ER&amp;D component and we would like to get your support with PI practice’s efforts in building proprietary ER&amp;D benchmarking databases.
</p>

<p>
The benchmarking team (in cc) will be reaching out with specifics. The team can help address any queries and will work with you to gather data for our Benchmarking database. If you feel that you do not have visibility for the asked information or access to client data on ER&amp;D, please let us know.
For your reference, in case there are any concerns regarding sharing sensitive client data or confidentiality, we have worked extensively with Legal, and the standard Bain MSA includes language that allows us to collect and store data for benchmarking purposes. Moreover, our Benchmarking CoE team follows a very rigorous “double blind” process that disguises and protects any client data collected. BCoE also has a “do not contact” list that tells us explicitly which clients we should not collect data from, per their contracts.
</p>

<p>
Additionally, we would also like to highlight potential benchmarking resources, please refer to the Guide to ER&amp;D Benchmarking Sources, for more details on the R&amp;D benchmarks available with our Benchmarking CoE team. We also have a wide array of benchmarks across functions like Support functions, Supply Chain and ZBB from proprietary databases (curated by Bain experts) and other third party vendors (APQC, Gartner, IFMA, ALM, Stella, MPI etc.) available with us.
</p>

<p>Thanks in advance!</p>

<p>Best,<br/>Sebastian</p>
"#;

const BODY_FOLLOW_UP_ERD: &str = r#"
<p>Hi {{ case_manager_name }},</p>

<p>Hope you're doing well!</p>

<p>
I work with the Benchmarking team and following up on e-mail below, we would need your support in completing the <a href="https://benchmarkingsurvey.bain.com/">linked survey</a> based on the ER&amp;D work you are doing with <strong>{{ client_name }}</strong>(<strong>{{ case_code }}</strong>). To kick-start this data collection, we have two asks from you at this point:
</p>

<ul>
<li>Identify a case team member for this task who can work with us in filling the linked survey, and we’ll provide the access link from our end</li>
<li>Set up a brief call to align on what kind of data would be available and how we can best work together on this. I can directly run through your calendar or work with your EA and find a convenient slot. Let me know what works best for you</li>
</ul>

<p>Thank you,<br/>{{ poc_display_name }}</p>

<p><em>More details on the survey</em></p>

<p><strong>Content:</strong> A high level view of the survey: You'll find instructions on the first tab and definitions throughout the survey as you click to enter data. We are collecting data across the following sections:</p>
<ul>
<li>‘Demographics' tab: Descriptors of the company or business unit in scope for Bain case – this spans basic demographics, financials, ownership, organization, and strategic/competitive position</li>
<li>‘Overall ER&amp;D Survey’ tab: Data on overall R&amp;D cost, organization layers, time spent, and performance</li>
<li>‘ER&amp;D SW Survey’ tab: More focused on software-specific metrics such as developer time, code, pull requests, development efficiency, and more. Please feel free to skip this tab if it's not relevant.</li>
</ul>

<p>Important points to note are that we are aiming to get following separate sets of data:</p>
<ul>
<li>‘As-Is' data: Client data at the start of the Bain work (would also include any estimates that the Bain case team has made which reflect the As-Is state of the client, and can be used for Benchmarking purposes)</li>
<li>‘To-Be’ data: Committed targets/recommendations, ideally the values which have been agreed to by the client based on Bain work</li>
</ul>
"#;

const BODY_ESCALATION_ERD: &str = r#"
<p>Hi {{ case_manager_name }},</p>

<p>Hope you're doing well.</p>

<p>
I lead the ER&amp;D benchmarking team at BCN and following up on the below, it would be great if you could connect us to a team member who can help us in filling the attached ER&amp;D data survey for <strong>{{ client_name }}</strong>.
</p>

<p>
If in case you’re tied up with case work, please feel free to let us know if we should get back at a later date.
</p>

<p>Looking forward to hearing from you.</p>

<p>Best,<br/>Aseem</p>
"#;

// ── Non-ER&D placeholder copy (structure-matched) ───────────────────

fn placeholder_initial(label: &str) -> String {
    format!(
        r#"
<p>Hi {{{{ case_manager_name }}}},</p>

<p>Hope you are doing well!</p>

<p>
I am writing regarding your work with <strong>{{{{ client_name }}}}</strong> (<strong>{{{{ case_code }}}}</strong>) and our ongoing Data Collection initiative for <strong>{label}</strong>. Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.
</p>

<p>
The benchmarking team (in cc) will follow up with specifics and support throughout the process. In case of any concerns about data handling or confidentiality, please note we follow a rigorous process to protect client information. Lorem ipsum dolor sit amet, consectetur adipiscing elit.
</p>

<p>Thanks in advance!</p>

<p>Best,<br/>Sebastian</p>
"#
    )
}

fn placeholder_follow_up(label: &str) -> String {
    format!(
        r##"
<p>Hi {{{{ case_manager_name }}}},</p>

<p>Hope you're doing well!</p>

<p>
Following up on the note below, we would appreciate your support in completing the <a href="#">linked survey</a> for <strong>{label}</strong> based on the work with <strong>{{{{ client_name }}}}</strong> (<strong>{{{{ case_code }}}}</strong>). To kick-start, we have two quick asks:
</p>

<ul>
<li>Identify a team member who can work with us to fill the survey; we will share access from our end.</li>
<li>Set up a brief call to align on available data and the best way to collaborate. Lorem ipsum dolor sit amet.</li>
</ul>

<p>Thank you,<br/>{{{{ poc_display_name }}}}</p>

<p><em>More details on the survey</em></p>

<p><strong>Content:</strong> Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sections include basic demographics, process measures, and performance indicators relevant to {label}.</p>
<ul>
<li>‘Demographics’ tab</li>
<li>‘Overall {label} Survey’ tab</li>
<li>‘{label} Advanced’ tab (optional)</li>
</ul>

<p>We aim to collect both ‘As-Is’ and ‘To-Be’ data. Lorem ipsum dolor sit amet.</p>
"##
    )
}

fn placeholder_escalation(label: &str) -> String {
    format!(
        r#"
<p>Hi {{{{ case_manager_name }}}},</p>

<p>Hope you're doing well.</p>

<p>
Following up on the below, it would be great if you could connect us to a team member who can help fill the attached data survey for <strong>{{{{ client_name }}}}</strong> ({label}). Lorem ipsum dolor sit amet, consectetur adipiscing elit.
</p>

<p>
If you're tied up with case work, happy to reconnect at a later date. Looking forward to hearing from you.
</p>

<p>Best,<br/>Aseem</p>
"#
    )
}

// ── Tests ───────────────────────────────────────────────────────────

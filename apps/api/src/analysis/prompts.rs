// Prompt templates for the three session actions.
// Templates are plain data; `PromptTemplate::render` is the only substitution step.

use tracing::debug;

/// Named fields a template may reference as `{resume_text}` / `{jd_text}`.
#[derive(Debug, Clone, Copy)]
pub struct PromptFields<'a> {
    pub resume_text: &'a str,
    pub jd_text: &'a str,
}

impl<'a> PromptFields<'a> {
    fn get(&self, name: &str) -> Option<&'a str> {
        match name {
            "resume_text" => Some(self.resume_text),
            "jd_text" => Some(self.jd_text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub body: &'static str,
}

impl PromptTemplate {
    /// Single-pass substitution: placeholders are only recognised in the template
    /// body, so inputs containing `{jd_text}` etc. are embedded verbatim.
    /// Unknown `{...}` sequences in the body are left untouched.
    pub fn render(&self, fields: &PromptFields<'_>) -> String {
        let mut out = String::with_capacity(
            self.body.len() + fields.resume_text.len() + fields.jd_text.len(),
        );
        let mut rest = self.body;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match after.find('}').and_then(|close| {
                fields
                    .get(&after[..close])
                    .map(|value| (value, close))
            }) {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        debug!("Rendered '{}' prompt ({} bytes)", self.name, out.len());
        out
    }
}

pub const ENHANCE_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "enhance",
    body: r#"You are a professional resume writer.

Here is a resume:
{resume_text}

Here is a job description:
{jd_text}

Please rewrite the resume to:
- Improve the summary section
- Add missing relevant keywords from the job description
- Rewrite experience bullet points to be more impactful
- Keep formatting simple and ATS-friendly

Return the enhanced resume in plain text format."#,
};

pub const RATE_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "rate",
    body: r#"You are an expert recruiter and resume reviewer.

Here is a resume:
{resume_text}

Here is the job description:
{jd_text}

Please do the following:
1. Rate how well the resume matches the job description (score out of 100).
2. Highlight strengths and weaknesses.
3. Suggest specific improvements to make it more ATS-friendly and impactful.
4. Return the result in a clear, readable format."#,
};

pub const OPTIMIZE_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "optimize",
    body: r#"You are an ATS (Applicant Tracking System) optimization specialist.

Here is a resume:
{resume_text}

Here is the job description:
{jd_text}

Please do the following:
1. List the important keywords from the job description that are missing from the resume.
2. For each missing keyword, say which resume section (Summary, Skills or Experience) it belongs in.
3. Only suggest keywords the candidate could truthfully claim based on the resume.
4. Return the result as a plain-text list."#,
};

pub fn enhance_prompt(resume_text: &str, jd_text: &str) -> String {
    ENHANCE_TEMPLATE.render(&PromptFields {
        resume_text,
        jd_text,
    })
}

pub fn rate_prompt(resume_text: &str, jd_text: &str) -> String {
    RATE_TEMPLATE.render(&PromptFields {
        resume_text,
        jd_text,
    })
}

pub fn optimize_prompt(resume_text: &str, jd_text: &str) -> String {
    OPTIMIZE_TEMPLATE.render(&PromptFields {
        resume_text,
        jd_text,
    })
}

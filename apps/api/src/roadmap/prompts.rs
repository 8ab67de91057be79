// Prompt constants for roadmap generation.

/// Roadmap generation prompt template. Replace `{prompt}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"As an expert in educational planning and career development, create a detailed, personalized learning roadmap.

Input Information:
{prompt}

Requirements:
1. The roadmap should be practical and achievable
2. Include specific, actionable steps
3. Recommend high-quality, relevant resources
4. Consider the user's time commitment and background
5. Focus on progressive skill development

Provide the response in this exact JSON format:
{
  "title": "A clear, motivating title for the roadmap",
  "description": "A comprehensive overview of the learning path, including expected outcomes",
  "steps": [
    "Detailed step 1 with clear action items",
    "Detailed step 2 with clear action items",
    ...
  ],
  "resources": [
    {
      "name": "Resource name",
      "type": "Specific type (course/book/tutorial/tool/community)",
      "url": "Direct URL to the resource (if applicable)"
    }
  ]
}"#;

/// Embeds the caller's prompt verbatim into the generation template.
pub fn build_roadmap_prompt(prompt: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE.replacen("{prompt}", prompt, 1)
}

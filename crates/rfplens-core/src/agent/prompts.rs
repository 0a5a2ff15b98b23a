//! Prompt templates for the analyst, critic, router, and personas

use crate::agent::router::Category;
use crate::llm::ChatMessage;

/// Marker injected when no critique exists yet
pub const NO_CRITIQUE_MARKER: &str = "None";

/// Fixed survey query used to gather context for the executive brief
pub const BRIEF_SURVEY_QUERY: &str = "Overview executive summary risks technical architecture";

/// Prompt for drafting (or redrafting) an answer
pub fn draft_prompt(context: &str, question: &str, critique: Option<&str>) -> Vec<ChatMessage> {
    let critique_text = critique.unwrap_or(NO_CRITIQUE_MARKER);

    vec![
        ChatMessage::system(
            "You are an expert RFP Analyst. Answer the question based on the context.",
        ),
        ChatMessage::user(format!(
            "Context: {}\n\
             User Question: {}\n\n\
             Previous Critique (if any): {}\n\n\
             Answer:",
            context, question, critique_text
        )),
    ]
}

/// Prompt for reviewing a draft answer
pub fn critique_prompt(question: &str, draft: &str, sentinel: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("Review this answer for accuracy and clarity."),
        ChatMessage::user(format!(
            "User Question: {}\n\
             Draft Answer: {}\n\n\
             If the answer is comprehensive and clear, reply exactly: \"{}\"\n\
             If it is missing details or vague, reply with specific feedback on what to fix.",
            question, draft, sentinel
        )),
    ]
}

/// Prompt for classifying a question into a category.
///
/// The tie-break priority (LEGAL wins when financial or risk terms co-occur
/// with technical terms) is stated explicitly; classification output is free
/// text and still goes through normalization afterwards.
pub fn routing_prompt(question: &str, history: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a Router. Classify the user's question into exactly one of two categories:\n\
             \n\
             1. LEGAL (Select this if the question mentions cost, price, money, economy, risks, \
             business value, or compliance).\n\
             2. TECHNICAL (Select this ONLY if the question is about how things work, \
             architecture, code, implementation, or tools).\n\
             \n\
             CRITICAL INSTRUCTION: If a question mentions both (e.g., \"Cost of agents\"), \
             classify it as LEGAL because cost is a business concern.\n\
             \n\
             Return ONLY the word 'TECHNICAL' or 'LEGAL'. Do not add punctuation.",
        ),
        ChatMessage::user(format!("History: {}\nQuestion: {}", history, question)),
    ]
}

/// Persona system line for a category
fn persona(category: Category) -> &'static str {
    match category {
        Category::Technical => {
            "You are a Technical Architect. Answer with technical depth, using precise \
             terminology for systems, interfaces, and implementation."
        }
        Category::Legal => {
            "You are a Business Analyst. Answer focusing on value, risks, and costs. \
             Avoid deep implementation details."
        }
    }
}

/// Prompt for answering a routed chat question
pub fn persona_prompt(
    category: Category,
    context: &str,
    history: &str,
    question: &str,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(persona(category)),
        ChatMessage::user(format!(
            "Context: {}\n\
             History: {}\n\
             Question: {}\n\
             Answer:",
            context, history, question
        )),
    ]
}

/// Prompt for generating the executive brief
pub fn brief_prompt(context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a Senior Proposal Writer. Write a structured Executive Brief. \
             Use Markdown headers (#).",
        ),
        ChatMessage::user(format!("Context: {}", context)),
    ]
}

/// Prompt for refining a brief draft from feedback
pub fn refine_prompt(draft: &str, feedback: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are a Senior Editor. Rewrite this draft based on feedback."),
        ChatMessage::user(format!("Draft: {}\nFeedback: {}", draft, feedback)),
    ]
}

//! Prompt construction for the two reasoning-service modes.
//!
//! The prompts are fixed text: the exclusion rules and the best-frame
//! rubric are part of the product's behavior, not user-configurable.
//! Keeping the builders pure makes them trivially unit-testable.

/// Builds the free-text prompt for a question about the CSV data.
///
/// Embeds the analysis exclusion rules (organizations, generic product
/// terms, countries, tournaments, player names), the verbatim CSV text,
/// and the user's question, and demands a direct answer with no
/// reasoning steps.
pub fn build_question_prompt(csv_text: &str, question: &str) -> String {
    format!(
        "You are an expert data analyst. Your task is to answer a question based on the \
         provided CSV data. Carefully analyze the data to find the answer.\n\n\
         IMPORTANT GUIDELINES FOR ANALYSIS:\n\
         - Exclude the following entities from your analysis and final answer:\n\
           - Cricket organizations (e.g., ICC, BCCI).\n\
           - Non-sponsoring product names and taglines (e.g., 5G).\n\
           - Country names (e.g., INDIA, AUSTRALIA).\n\
           - Tournament names (e.g., WORLD CUP, ASIA CUP).\n\
           - Player names (e.g., VIRAT, BABAR).\n\
         - Your focus should be on commercial brands and sponsors present in the data.\n\n\
         Your response must be only the final answer to the user's question, without any \
         of your reasoning, steps, or analysis process. Be direct and concise.\n\n\
         Here is the CSV data (the first row is the header):\n\
         ---\n\
         {csv_text}\n\
         ---\n\n\
         Here is the user's question:\n\
         ---\n\
         \"{question}\"\n\
         ---\n\n\
         Final Answer:"
    )
}

/// Builds the structured best-frame prompt for a target brand.
///
/// Describes the fixed, ordered rubric: (1) `c_li` relative coverage,
/// highest is best and most important; (2) ad-location category, prime
/// placements weighted higher; (3) ad placement detail; (4) scene/action
/// description, exciting action weighted higher.
pub fn build_best_frame_prompt(csv_text: &str, brand: &str) -> String {
    format!(
        "You are an expert sports marketing analyst. Your task is to find the single best \
         frame from the provided CSV data that represents the most valuable brand exposure \
         for a specific brand.\n\n\
         Analyze the data based on these four criteria in order of importance:\n\
         1. 'c_li' (Relative Coverage): the relative area of the logo compared to the total \
         frame area. Higher values are better. This is the most important factor.\n\
         2. 'ad_categories' (Ad Location): where the logo appears (e.g., \"Jersey\", \
         \"Boundary Rope\", \"On-screen graphics\"). Prime locations like jerseys or \
         prominent on-screen graphics are more valuable.\n\
         3. 'Ad_details' (Ad Context): more specific details about the ad's location.\n\
         4. 'General Description' (Action Context): the action happening in the frame. \
         Frames with exciting action (e.g., \"a boundary is hit\", \"a wicket is taken\", \
         \"player celebration\") are more valuable than neutral moments.\n\n\
         Your Goal: identify the single frame_no that provides the optimal combination of \
         these factors for the brand: \"{brand}\".\n\n\
         CSV Data:\n\
         ---\n\
         {csv_text}\n\
         ---\n\n\
         Analyze the entire dataset for instances of \"{brand}\" and select the single best \
         frame. Provide the frame number and a detailed justification for your choice, \
         explaining how it excels across the given criteria."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_embeds_csv_and_question() {
        let prompt = build_question_prompt("brand_name,c_li\nPepsi,0.1", "Which brand leads?");
        assert!(prompt.contains("Pepsi,0.1"));
        assert!(prompt.contains("Which brand leads?"));
        assert!(prompt.contains("Final Answer:"));
    }

    #[test]
    fn test_question_prompt_contains_exclusion_rules() {
        let prompt = build_question_prompt("", "");
        assert!(prompt.contains("ICC"));
        assert!(prompt.contains("Country names"));
        assert!(prompt.contains("Tournament names"));
        assert!(prompt.contains("Player names"));
    }

    #[test]
    fn test_best_frame_prompt_rubric_order() {
        let prompt = build_best_frame_prompt("csv", "Pepsi");
        let coverage = prompt.find("'c_li'").unwrap();
        let location = prompt.find("'ad_categories'").unwrap();
        let detail = prompt.find("'Ad_details'").unwrap();
        let action = prompt.find("'General Description'").unwrap();
        assert!(coverage < location && location < detail && detail < action);
        assert!(prompt.contains("most important factor"));
    }

    #[test]
    fn test_best_frame_prompt_embeds_brand() {
        let prompt = build_best_frame_prompt("csv data here", "Dream11");
        assert!(prompt.contains("\"Dream11\""));
        assert!(prompt.contains("csv data here"));
    }
}

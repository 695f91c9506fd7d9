pub mod formatter;

pub use formatter::{
    format_answer_checks, format_detailed_result, format_dimension_tsv, format_json,
    format_position_tag, format_question_list, format_score_bar, format_simple_result,
    format_summary_card, ntrp_explanation, should_use_colors,
};

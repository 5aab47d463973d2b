pub mod stage2_normalize;
pub mod stage3_score;
pub mod stage4_rank;
pub mod stage5_report;

//! Savings goal planning

mod goal;

pub use goal::{
    calculate_savings_goal, required_contribution, ContributionFrequency, ContributionItem, Milestone,
    SavingsGoalInputs, SavingsGoalResult, MILESTONE_PERCENTAGES,
};

//! Built-in content banks.

use once_cell::sync::Lazy;

use super::bank::{ActionTag, ContentBank, ContentEntry};
use crate::analysis::SeverityTier;
use crate::schema::Category;

// Three entries per (category, severity) so a draw of two varies between calls.
const RECOMMENDATIONS: &[(&str, Category, SeverityTier, &str)] = &[
    ("econ_low_1", Category::Economic, SeverityTier::Low, "Focus on the remaining gaps in career progression (promotions, senior roles, leadership pipelines), not just participation."),
    ("econ_low_2", Category::Economic, SeverityTier::Low, "Track pay and income differences by sector and age to catch small but persistent gaps early."),
    ("econ_low_3", Category::Economic, SeverityTier::Low, "Target support to groups that often lag behind national averages (rural workers, migrants, single parents)."),
    ("econ_mid_1", Category::Economic, SeverityTier::Middle, "Reduce barriers to stable work, especially childcare costs, transport constraints, and dependence on informal jobs."),
    ("econ_mid_2", Category::Economic, SeverityTier::Middle, "Expand access to upskilling for higher-paying sectors (digital, technical, trades) and measure job placement outcomes."),
    ("econ_mid_3", Category::Economic, SeverityTier::Middle, "Improve enforcement and reporting for workplace discrimination and pay practices to reduce unexplained gaps."),
    ("econ_high_1", Category::Economic, SeverityTier::High, "Increase access to safe, paid work through local employment programs and basic worker protections."),
    ("econ_high_2", Category::Economic, SeverityTier::High, "Address major constraints directly: legal restrictions, childcare availability, and safety risks that limit participation."),
    ("econ_high_3", Category::Economic, SeverityTier::High, "Scale financial inclusion where it is a bottleneck: basic accounts, credit access, and accessible digital payments."),
    ("soc_low_1", Category::Social, SeverityTier::Low, "Monitor outcomes for subgroups where gaps can be hidden in national averages (minorities, migrants, rural communities)."),
    ("soc_low_2", Category::Social, SeverityTier::Low, "Ensure policies are applied consistently across regions, especially for services and administrative access."),
    ("soc_low_3", Category::Social, SeverityTier::Low, "Use early signals (dropout increases, reduced service access) to prevent backsliding."),
    ("soc_mid_1", Category::Social, SeverityTier::Middle, "Reduce exclusion by tackling practical barriers: cost, travel distance, and safety around schools and services."),
    ("soc_mid_2", Category::Social, SeverityTier::Middle, "Improve access to core administrative services that gate participation (IDs, registration, benefits)."),
    ("soc_mid_3", Category::Social, SeverityTier::Middle, "Expand community support services (local centers, referral networks) and track coverage and uptake."),
    ("soc_high_1", Category::Social, SeverityTier::High, "Keep girls connected to education and services through direct cost support and safe access routes."),
    ("soc_high_2", Category::Social, SeverityTier::High, "Remove administrative barriers by simplifying registration and expanding outreach delivery."),
    ("soc_high_3", Category::Social, SeverityTier::High, "Strengthen protection and inclusion for high-risk groups with clear referral pathways and accountability."),
    ("phys_low_1", Category::Physical, SeverityTier::Low, "Focus on remaining health access gaps by region, income, and migration status."),
    ("phys_low_2", Category::Physical, SeverityTier::Low, "Improve preventive care uptake and continuity (screening, follow-ups) to reduce long-run differences in outcomes."),
    ("phys_low_3", Category::Physical, SeverityTier::Low, "Track equity in service quality (waiting times, outcomes) so strong averages do not hide unequal experiences."),
    ("phys_mid_1", Category::Physical, SeverityTier::Middle, "Expand primary care coverage in underserved areas and reduce travel and availability barriers."),
    ("phys_mid_2", Category::Physical, SeverityTier::Middle, "Strengthen maternal and reproductive care access with clear coverage targets and follow-through."),
    ("phys_mid_3", Category::Physical, SeverityTier::Middle, "Reduce affordability barriers (fees, transport, essential medicines) that limit access even when services exist."),
    ("phys_high_1", Category::Physical, SeverityTier::High, "Prioritize essential healthcare access (maternal care, emergency care, basic medicines) in underserved communities."),
    ("phys_high_2", Category::Physical, SeverityTier::High, "Address safety barriers to care access, including mobility constraints and facility security risks."),
    ("phys_high_3", Category::Physical, SeverityTier::High, "Use outreach delivery (mobile clinics, community health workers) where fixed service coverage is limited."),
];

// Personal actions apply whatever the weakest category is.
const ACTIONS: &[(&str, SeverityTier, ActionTag, &str)] = &[
    ("a2", SeverityTier::Low, ActionTag::Daily, "Call out biased language when it happens (calmly and specifically), especially in group settings."),
    ("a6", SeverityTier::Low, ActionTag::Daily, "Support women-owned businesses and creators when you can, and recommend them to others."),
    ("low_1", SeverityTier::Low, ActionTag::Work, "In group work, make credit explicit: name who did what, and avoid letting ideas get “re-assigned.”"),
    ("men_low_1", SeverityTier::Low, ActionTag::MentalHealth, "Normalize men talking about stress and mental health by checking in and responding without judgment or jokes."),
    ("men_low_2", SeverityTier::Low, ActionTag::Relationships, "Encourage healthy masculinity: praise empathy, emotional honesty, and respectful behavior, not aggression or dominance."),
    ("a1", SeverityTier::Middle, ActionTag::Work, "In your workplace or classes, push for transparent criteria for promotions, pay, and leadership roles."),
    ("a3", SeverityTier::Middle, ActionTag::Community, "Volunteer skills (CV reviews, tutoring, interview prep) through local programs supporting women and girls."),
    ("a7", SeverityTier::Middle, ActionTag::Community, "Share practical resources (hotlines, shelters, legal aid) in your network; people often don’t know what exists."),
    ("a8", SeverityTier::Middle, ActionTag::Work, "If you lead a team or project, track speaking time and decisions so everyone is heard and credited."),
    ("mid_1", SeverityTier::Middle, ActionTag::Work, "Mentor or sponsor someone (especially early-career) and help them access opportunities, not just advice."),
    ("men_mid_1", SeverityTier::Middle, ActionTag::MentalHealth, "Support men’s mental health access: share therapy/helpline resources and treat help-seeking as normal, not weak."),
    ("men_mid_2", SeverityTier::Middle, ActionTag::Relationships, "Model fair sharing of unpaid work (planning, chores, caregiving) and talk about it openly with friends/partners."),
    ("a4", SeverityTier::High, ActionTag::Money, "Donate regularly (even small amounts) to vetted orgs focused on education, legal support, or safety."),
    ("a5", SeverityTier::High, ActionTag::Policy, "Vote and advocate for policies that expand childcare access, equal pay enforcement, and protection from violence."),
    ("high_1", SeverityTier::High, ActionTag::Policy, "Support workplace policies that materially change outcomes: paid parental leave, flexible work, and anti-harassment enforcement."),
    ("high_2", SeverityTier::High, ActionTag::Community, "If someone is at risk, help them reach support safely (hotlines, shelters, legal aid) and stay with them through the first steps."),
    ("men_high_1", SeverityTier::High, ActionTag::MentalHealth, "Actively challenge stigma that blocks men from getting help (e.g., “man up” culture) and promote safer, supportive norms."),
];

static RECOMMENDATION_BANK: Lazy<ContentBank> = Lazy::new(|| ContentBank {
    name: "recommendations".to_string(),
    entries: RECOMMENDATIONS
        .iter()
        .map(|&(id, category, severity, text)| ContentEntry {
            id: id.to_string(),
            category: Some(category),
            severity,
            tag: None,
            text: text.to_string(),
        })
        .collect(),
});

static ACTION_BANK: Lazy<ContentBank> = Lazy::new(|| ContentBank {
    name: "actions".to_string(),
    entries: ACTIONS
        .iter()
        .map(|&(id, severity, tag, text)| ContentEntry {
            id: id.to_string(),
            category: None,
            severity,
            tag: Some(tag),
            text: text.to_string(),
        })
        .collect(),
});

/// Policy recommendations per category and severity.
pub fn recommendations() -> &'static ContentBank {
    &RECOMMENDATION_BANK
}

/// Personal "what you can do" actions per severity.
pub fn actions() -> &'static ContentBank {
    &ACTION_BANK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_banks_are_valid() {
        for bank in [recommendations(), actions()] {
            let rebuilt = ContentBank::new(bank.name(), bank.entries().to_vec());
            assert!(rebuilt.is_ok(), "bank {} failed validation", bank.name());
        }
    }

    #[test]
    fn test_recommendations_cover_every_pool() {
        for category in Category::PRECEDENCE {
            for severity in SeverityTier::ALL {
                assert_eq!(recommendations().pool(category, severity).len(), 3);
            }
        }
    }

    #[test]
    fn test_actions_match_any_category() {
        for severity in SeverityTier::ALL {
            let economic = actions().pool(Category::Economic, severity);
            let physical = actions().pool(Category::Physical, severity);
            assert!(!economic.is_empty());
            assert_eq!(economic, physical);
        }
    }
}

//! 内置题库

use crate::models::Domain;

/// 默认的四个面试领域，每个领域五道题
pub fn default_domains() -> Vec<Domain> {
    vec![
        Domain::new(
            "software-engineering",
            "Software Engineering",
            &[
                "Explain the difference between REST and GraphQL APIs.",
                "How would you implement a rate limiting system?",
                "Describe the SOLID principles in software design.",
                "What are the trade-offs between microservices and monolithic architecture?",
                "How do you handle database migrations in a production environment?",
            ],
        ),
        Domain::new(
            "data-science",
            "Data Science",
            &[
                "Explain the bias-variance tradeoff in machine learning.",
                "How would you handle missing data in a dataset?",
                "Describe the difference between supervised and unsupervised learning.",
                "What metrics would you use to evaluate a classification model?",
                "How do you prevent overfitting in neural networks?",
            ],
        ),
        Domain::new(
            "product-management",
            "Product Management",
            &[
                "How would you prioritize features for a product roadmap?",
                "Describe how you would measure product success.",
                "How do you handle conflicting stakeholder requirements?",
                "Walk me through your process for user research.",
                "How would you launch a product in a new market?",
            ],
        ),
        Domain::new(
            "business-analysis",
            "Business Analysis",
            &[
                "How do you gather and document business requirements?",
                "Explain the difference between functional and non-functional requirements.",
                "How would you conduct a stakeholder analysis?",
                "Describe your approach to process improvement.",
                "How do you handle scope creep in projects?",
            ],
        ),
    ]
}

//! The offline responder: keyword rules mapped to canned replies.
//!
//! A [`RuleTable`] is an ordered list of [`ResponseRule`]s. An incoming
//! message is lower-cased and tested against each rule in order; the
//! template of the first rule with at least one keyword contained in the
//! message is the reply. When nothing matches, the table's fallback reply is
//! used. The order of the rules is the only precedence there is: a message
//! mentioning both "features" and "pricing" gets the features reply because
//! that rule comes first, no matter which word appears first in the message.
//!
//! Matching is plain substring containment, so `hi` also matches inside
//! `this` or `shipping`.

mod templates;

/// The topic a rule answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// What the product offers.
    Features,
    /// Subscription plans.
    Pricing,
    /// Onboarding steps.
    GettingStarted,
    /// Supported payment gateways.
    Payments,
    /// How to reach the support team.
    Support,
    /// Who builds the product.
    Company,
    /// Inventory and stock management.
    Inventory,
    /// Staff management.
    Staff,
    /// Tables and reservations.
    Reservations,
    /// Salutations.
    Greeting,
    /// Gratitude.
    Thanks,
}

/// A keyword group bound to a reply template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResponseRule {
    /// Topic of this rule.
    pub topic: Topic,
    /// Lower-case keywords, any of which selects this rule.
    pub keywords: &'static [&'static str],
    /// The reply.
    pub template: &'static str,
}

impl ResponseRule {
    #[inline]
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// A static, ordered rule table with a fallback reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleTable {
    rules: &'static [ResponseRule],
    fallback: &'static str,
}

static BUILTIN_RULES: [ResponseRule; 11] = [
    ResponseRule {
        topic: Topic::Features,
        keywords: &["feature", "what can", "offer"],
        template: templates::FEATURES,
    },
    ResponseRule {
        topic: Topic::Pricing,
        keywords: &["price", "pricing", "cost", "plan"],
        template: templates::PRICING,
    },
    ResponseRule {
        topic: Topic::GettingStarted,
        keywords: &["start", "sign up", "register", "begin"],
        template: templates::GETTING_STARTED,
    },
    ResponseRule {
        topic: Topic::Payments,
        keywords: &["payment", "bkash", "nagad", "pay"],
        template: templates::PAYMENTS,
    },
    ResponseRule {
        topic: Topic::Support,
        keywords: &["contact", "support", "help", "reach"],
        template: templates::SUPPORT,
    },
    ResponseRule {
        topic: Topic::Company,
        keywords: &["bridge byte", "who made", "developer", "company"],
        template: templates::COMPANY,
    },
    ResponseRule {
        topic: Topic::Inventory,
        keywords: &["inventory", "stock"],
        template: templates::INVENTORY,
    },
    ResponseRule {
        topic: Topic::Staff,
        keywords: &["staff", "employee", "attendance", "salary"],
        template: templates::STAFF,
    },
    ResponseRule {
        topic: Topic::Reservations,
        keywords: &["table", "reservation", "booking"],
        template: templates::RESERVATIONS,
    },
    ResponseRule {
        topic: Topic::Greeting,
        keywords: &["hello", "hi", "hey"],
        template: templates::GREETING,
    },
    ResponseRule {
        topic: Topic::Thanks,
        keywords: &["thank"],
        template: templates::THANKS,
    },
];

static BUILTIN: RuleTable = RuleTable::new(&BUILTIN_RULES, templates::FALLBACK);

impl RuleTable {
    /// Creates a table from rules in precedence order.
    ///
    /// Keywords must already be lower-case, otherwise they never match.
    #[inline]
    pub const fn new(
        rules: &'static [ResponseRule],
        fallback: &'static str,
    ) -> Self {
        Self { rules, fallback }
    }

    /// Returns the product's built-in table.
    #[inline]
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    /// Returns the rules in precedence order.
    #[inline]
    pub fn rules(&self) -> &'static [ResponseRule] {
        self.rules
    }

    /// Returns the reply used when no rule matches.
    #[inline]
    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Returns the first rule matching the message, if any.
    pub fn find(&self, message: &str) -> Option<&'static ResponseRule> {
        let lowered = message.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    /// Returns the topic of the first rule matching the message.
    #[inline]
    pub fn match_topic(&self, message: &str) -> Option<Topic> {
        self.find(message).map(|rule| rule.topic)
    }

    /// Returns the reply for the message. Never fails.
    #[inline]
    pub fn select(&self, message: &str) -> &'static str {
        self.find(message)
            .map(|rule| rule.template)
            .unwrap_or(self.fallback)
    }
}

impl Default for RuleTable {
    #[inline]
    fn default() -> Self {
        BUILTIN
    }
}

/// Returns the built-in table's reply for the message.
#[inline]
pub fn offline_response(message: &str) -> &'static str {
    BUILTIN.select(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features() {
        assert_eq!(
            offline_response("What features do you have?"),
            templates::FEATURES
        );
        assert_eq!(offline_response("What can it do"), templates::FEATURES);
    }

    #[test]
    fn test_greeting() {
        assert_eq!(offline_response("hello"), templates::GREETING);
        assert_eq!(offline_response("Hey there"), templates::GREETING);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(offline_response("asdkjasd"), templates::FALLBACK);
        assert_eq!(offline_response(""), templates::FALLBACK);
        assert_eq!(
            RuleTable::builtin().fallback(),
            offline_response("zzz")
        );
    }

    #[test]
    fn test_pricing_keywords() {
        for message in [
            "price",
            "What's the PRICING?",
            "How much does it cost",
            "Which plan suits a small cafe",
            "Tell me about pricing plans",
        ] {
            assert_eq!(
                offline_response(message),
                templates::PRICING,
                "{message}"
            );
        }
    }

    #[test]
    fn test_precedence_follows_rule_order() {
        // Pricing words come first in the message, but the features rule
        // is listed before the pricing rule.
        assert_eq!(
            offline_response("pricing and features"),
            templates::FEATURES
        );
        // Payments are listed before support.
        assert_eq!(
            offline_response("Do you support bKash?"),
            templates::PAYMENTS
        );
        // Company is listed before greeting, even though "this" has "hi".
        assert_eq!(offline_response("Who made this?"), templates::COMPANY);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            RuleTable::builtin().match_topic("INVENTORY levels"),
            Some(Topic::Inventory)
        );
        assert_eq!(
            RuleTable::builtin().match_topic("Staff SALARY"),
            Some(Topic::Staff)
        );
    }

    #[test]
    fn test_every_topic_is_reachable() {
        let cases = [
            ("How do I get started?", Topic::GettingStarted),
            ("Can I pay with nagad", Topic::Payments),
            ("How do I contact you", Topic::Support),
            ("Tell me about Bridge Byte", Topic::Company),
            ("low stock alerts", Topic::Inventory),
            ("employee attendance", Topic::Staff),
            ("I want to book a table", Topic::Reservations),
            ("thank you", Topic::Thanks),
        ];
        for (message, topic) in cases {
            assert_eq!(
                RuleTable::builtin().match_topic(message),
                Some(topic),
                "{message}"
            );
        }
    }

    #[test]
    fn test_substring_match_inside_words() {
        assert_eq!(
            RuleTable::builtin().match_topic("shipping"),
            Some(Topic::Greeting)
        );
    }

    #[test]
    fn test_custom_table() {
        static RULES: [ResponseRule; 1] = [ResponseRule {
            topic: Topic::Thanks,
            keywords: &["merci"],
            template: "De rien !",
        }];
        let table = RuleTable::new(&RULES, "Pardon ?");
        assert_eq!(table.select("Merci beaucoup"), "De rien !");
        assert_eq!(table.select("hello"), "Pardon ?");
        assert_eq!(table.rules().len(), 1);
    }
}

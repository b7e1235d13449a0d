use crate::auth::rbac::Resource;
use crate::core::models::{CampaignStatus, Channel, SocialPlatform, SocialPostStatus};
use crate::storage::database::entities::{
    self, campaign, coupon, marketing_template, social_post,
};
use crate::storage::repository::{RecordFilter, SalonRecord};
use crate::utils::error::{GlowError, Result};
use crate::utils::validation::require;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ColumnTrait, Condition, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clean;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInput {
    pub name: String,
    pub channel: Channel,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
}

impl SalonRecord for marketing_template::Model {
    type Entity = entities::MarketingTemplate;
    type Active = marketing_template::ActiveModel;
    type Input = TemplateInput;

    const RESOURCE: Resource = Resource::Marketing;
    const NAME: &'static str = "template";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> marketing_template::Column {
        marketing_template::Column::Id
    }

    fn sort_column() -> marketing_template::Column {
        marketing_template::Column::Name
    }

    fn validate(input: &TemplateInput) -> Result<()> {
        require("name", &input.name)?;
        require("body", &input.body)?;
        if input.channel == Channel::Email && clean(input.subject.clone()).is_none() {
            return Err(GlowError::validation("e-mail templates need a subject"));
        }
        Ok(())
    }

    fn new_active(input: TemplateInput, id: Uuid, now: DateTime<Utc>) -> marketing_template::ActiveModel {
        marketing_template::ActiveModel {
            id: Set(id),
            name: Set(input.name.trim().to_string()),
            channel: Set(input.channel),
            subject: Set(clean(input.subject)),
            body: Set(input.body),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut marketing_template::ActiveModel, input: TemplateInput, now: DateTime<Utc>) {
        active.name = Set(input.name.trim().to_string());
        active.channel = Set(input.channel);
        active.subject = Set(clean(input.subject));
        active.body = Set(input.body);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use marketing_template::Column;
        filter
            .text_condition(&[Column::Name, Column::Subject, Column::Body])
            .add(filter.status_condition(Column::Channel))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignInput {
    pub name: String,
    #[serde(default)]
    pub template_id: Option<Uuid>,
    pub channel: Channel,
    #[serde(default = "draft_campaign")]
    pub status: CampaignStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

fn draft_campaign() -> CampaignStatus {
    CampaignStatus::Draft
}

impl SalonRecord for campaign::Model {
    type Entity = entities::Campaign;
    type Active = campaign::ActiveModel;
    type Input = CampaignInput;

    const RESOURCE: Resource = Resource::Marketing;
    const NAME: &'static str = "campaign";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> campaign::Column {
        campaign::Column::Id
    }

    fn sort_column() -> campaign::Column {
        campaign::Column::CreatedAt
    }

    fn newest_first() -> bool {
        true
    }

    fn validate(input: &CampaignInput) -> Result<()> {
        require("name", &input.name)?;
        if input.status == CampaignStatus::Scheduled && input.scheduled_at.is_none() {
            return Err(GlowError::validation("a scheduled campaign needs a send date"));
        }
        Ok(())
    }

    fn new_active(input: CampaignInput, id: Uuid, now: DateTime<Utc>) -> campaign::ActiveModel {
        let sent_at = (input.status == CampaignStatus::Sent).then_some(now);
        campaign::ActiveModel {
            id: Set(id),
            name: Set(input.name.trim().to_string()),
            template_id: Set(input.template_id),
            channel: Set(input.channel),
            status: Set(input.status),
            scheduled_at: Set(input.scheduled_at),
            sent_at: Set(sent_at),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut campaign::ActiveModel, input: CampaignInput, now: DateTime<Utc>) {
        if input.status == CampaignStatus::Sent {
            if let sea_orm::ActiveValue::Unchanged(None) = active.sent_at {
                active.sent_at = Set(Some(now));
            }
        }
        active.name = Set(input.name.trim().to_string());
        active.template_id = Set(input.template_id);
        active.channel = Set(input.channel);
        active.status = Set(input.status);
        active.scheduled_at = Set(input.scheduled_at);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use campaign::Column;
        filter
            .text_condition(&[Column::Name])
            .add(filter.status_condition(Column::Status))
            .add(filter.instant_condition(Column::ScheduledAt))
    }
}

/// Status filter values of the coupon list
const ACTIVE: &str = "active";
const INACTIVE: &str = "inactive";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponInput {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_percent: i32,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default = "crate::config::default_true")]
    pub active: bool,
}

fn coupon_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl SalonRecord for coupon::Model {
    type Entity = entities::Coupon;
    type Active = coupon::ActiveModel;
    type Input = CouponInput;

    const RESOURCE: Resource = Resource::Loyalty;
    const NAME: &'static str = "coupon";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> coupon::Column {
        coupon::Column::Id
    }

    fn sort_column() -> coupon::Column {
        coupon::Column::Code
    }

    fn validate(input: &CouponInput) -> Result<()> {
        let code = require("code", &input.code)?;
        if code.chars().any(char::is_whitespace) {
            return Err(GlowError::validation("the code cannot contain spaces"));
        }
        if !(1..=100).contains(&input.discount_percent) {
            return Err(GlowError::validation("the discount must be between 1 and 100 percent"));
        }
        if let (Some(from), Some(until)) = (input.valid_from, input.valid_until) {
            if until < from {
                return Err(GlowError::validation("the validity window ends before it starts"));
            }
        }
        Ok(())
    }

    fn new_active(input: CouponInput, id: Uuid, now: DateTime<Utc>) -> coupon::ActiveModel {
        coupon::ActiveModel {
            id: Set(id),
            code: Set(coupon_code(&input.code)),
            description: Set(clean(input.description)),
            discount_percent: Set(input.discount_percent),
            valid_from: Set(input.valid_from),
            valid_until: Set(input.valid_until),
            active: Set(input.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut coupon::ActiveModel, input: CouponInput, now: DateTime<Utc>) {
        active.code = Set(coupon_code(&input.code));
        active.description = Set(clean(input.description));
        active.discount_percent = Set(input.discount_percent);
        active.valid_from = Set(input.valid_from);
        active.valid_until = Set(input.valid_until);
        active.active = Set(input.active);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use coupon::Column;
        let status = match filter.status.as_deref() {
            Some(ACTIVE) => Condition::all().add(Column::Active.eq(true)),
            Some(INACTIVE) => Condition::all().add(Column::Active.eq(false)),
            _ => Condition::all(),
        };
        status
            .add(filter.text_condition(&[Column::Code, Column::Description]))
            .add(filter.day_condition(Column::ValidUntil))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPostInput {
    pub platform: SocialPlatform,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "draft_post")]
    pub status: SocialPostStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

fn draft_post() -> SocialPostStatus {
    SocialPostStatus::Draft
}

impl SalonRecord for social_post::Model {
    type Entity = entities::SocialPost;
    type Active = social_post::ActiveModel;
    type Input = SocialPostInput;

    const RESOURCE: Resource = Resource::SocialMedia;
    const NAME: &'static str = "post";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> social_post::Column {
        social_post::Column::Id
    }

    fn sort_column() -> social_post::Column {
        social_post::Column::CreatedAt
    }

    fn newest_first() -> bool {
        true
    }

    fn validate(input: &SocialPostInput) -> Result<()> {
        require("content", &input.content)?;
        if input.status == SocialPostStatus::Scheduled && input.scheduled_at.is_none() {
            return Err(GlowError::validation("a scheduled post needs a publication date"));
        }
        if let Some(url) = clean(input.image_url.clone()) {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(GlowError::validation("the image must be an http(s) link"));
            }
        }
        Ok(())
    }

    fn new_active(input: SocialPostInput, id: Uuid, now: DateTime<Utc>) -> social_post::ActiveModel {
        let published_at = (input.status == SocialPostStatus::Published).then_some(now);
        social_post::ActiveModel {
            id: Set(id),
            platform: Set(input.platform),
            content: Set(input.content),
            image_url: Set(clean(input.image_url)),
            status: Set(input.status),
            scheduled_at: Set(input.scheduled_at),
            published_at: Set(published_at),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut social_post::ActiveModel, input: SocialPostInput, now: DateTime<Utc>) {
        if input.status == SocialPostStatus::Published {
            if let sea_orm::ActiveValue::Unchanged(None) = active.published_at {
                active.published_at = Set(Some(now));
            }
        }
        active.platform = Set(input.platform);
        active.content = Set(input.content);
        active.image_url = Set(clean(input.image_url));
        active.status = Set(input.status);
        active.scheduled_at = Set(input.scheduled_at);
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use social_post::Column;
        // status filter accepts either the post status or the platform
        let status = match filter.status.as_deref() {
            Some(value) => Condition::any()
                .add(Column::Status.eq(value))
                .add(Column::Platform.eq(value)),
            None => Condition::all(),
        };
        status
            .add(filter.text_condition(&[Column::Content]))
            .add(filter.instant_condition(Column::ScheduledAt))
    }
}

//! Command dispatch: group message in, reply text out.
//!
//! The dispatcher owns the matcher and the lifecycle service. It returns the
//! reply to send (if any); actually sending it is the server's job. Storage
//! faults are logged in full and masked with a generic reply.

use tracing::{error, info};

use driftbottle_core::{BottleService, PickOutcome, ThrowOutcome};

use crate::commands::{Command, CommandMatcher};
use crate::event::GroupMessage;

const REPLY_EMPTY_CONTENT: &str = "漂流瓶内容不能为空哦~";
const REPLY_EMPTY_SEA: &str = "大海里暂时没有漂流瓶，试试自己扔一个吧~";
const REPLY_FAILURE: &str = "出错了，请稍后再试~";

/// Routes group messages to the bottle service and formats replies.
pub struct Dispatcher {
    matcher: CommandMatcher,
    service: BottleService,
}

impl Dispatcher {
    /// Creates a dispatcher over the given matcher and service.
    pub fn new(matcher: CommandMatcher, service: BottleService) -> Self {
        Self { matcher, service }
    }

    /// Handles one group message. Returns the reply text, or `None` when the
    /// message matches no command.
    pub async fn handle(&self, msg: &GroupMessage) -> Option<String> {
        match self.matcher.parse(&msg.text)? {
            Command::Throw(content) => Some(self.throw(&content, msg).await),
            Command::Pick => Some(self.pick(msg).await),
        }
    }

    async fn throw(&self, content: &str, msg: &GroupMessage) -> String {
        match self.service.throw(content, msg.user_id, msg.group_id).await {
            Ok(ThrowOutcome::Thrown { id, content }) => {
                info!(
                    bottle_id = id,
                    user_id = msg.user_id,
                    group_id = msg.group_id,
                    "bottle thrown"
                );
                format!("你将一个写着【{content}】的纸条塞入瓶中扔进大海，希望有人捞到吧~")
            }
            Ok(ThrowOutcome::EmptyContent) => REPLY_EMPTY_CONTENT.to_string(),
            Err(e) => {
                error!(user_id = msg.user_id, error = %e, "throw failed");
                REPLY_FAILURE.to_string()
            }
        }
    }

    async fn pick(&self, msg: &GroupMessage) -> String {
        match self.service.pick(msg.user_id, msg.group_id).await {
            Ok(PickOutcome::Picked {
                bottle,
                sender_name,
                sender_group_name,
            }) => {
                info!(
                    bottle_id = bottle.id,
                    user_id = msg.user_id,
                    group_id = msg.group_id,
                    "bottle picked"
                );
                format!(
                    "你在海边捡到了一个漂流瓶，瓶中的纸条上写着：\n{}\nBY：{} ({})\nFrom：{} ({})",
                    bottle.content,
                    sender_name,
                    bottle.sender_id,
                    sender_group_name,
                    bottle.sender_group_id
                )
            }
            Ok(PickOutcome::Empty) => REPLY_EMPTY_SEA.to_string(),
            Err(e) => {
                error!(user_id = msg.user_id, error = %e, "pick failed");
                REPLY_FAILURE.to_string()
            }
        }
    }
}

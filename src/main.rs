use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, ParseMode},
};
use times_table_bot::{
    chant,
    config::Config,
    fact::{self, MultiplicationFact},
    grid,
    quiz::{AnswerOutcome, QuizSession},
    tutor::{ChatGptTutor, Personality, TutorSession},
};

type TrainerDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Where the child is in the app. Kept in memory only, so nothing outlives a restart.
#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    Grid,
    Learn(MultiplicationFact),
    Quiz(QuizSession),
    Tutor(TutorSession),
}

const TABLE: &str = "Table / 乘法表";
const CHANT: &str = "Chant / 口诀表";
const QUIZ: &str = "Quiz / 测验";
const TUTOR: &str = "AI Tutor / 聪明猫";
const BACK: &str = "Back to Grid / 返回";
const SKIP: &str = "Skip this one ⏭";

/// Main menu buttons, accepted in every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Start,
    Table,
    Chant,
    Quiz,
    Tutor,
}

impl Menu {
    fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "/start" => Some(Menu::Start),
            TABLE => Some(Menu::Table),
            CHANT => Some(Menu::Chant),
            QUIZ => Some(Menu::Quiz),
            TUTOR => Some(Menu::Tutor),
            _ => None,
        }
    }
}

fn keyboard(mut rows: Vec<Vec<KeyboardButton>>) -> KeyboardMarkup {
    rows.push(vec![
        KeyboardButton::new(TABLE),
        KeyboardButton::new(CHANT),
        KeyboardButton::new(QUIZ),
        KeyboardButton::new(TUTOR),
    ]);
    KeyboardMarkup::new(rows)
}

#[tokio::main]
async fn main() -> HandlerResult {
    pretty_env_logger::init();
    log::info!("Starting times table bot...");

    let config = Config::from_env()?;
    let tutor = Arc::new(ChatGptTutor::new(&config, Personality::default())?);

    let bot = Bot::from_env();

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<State>, State>()
        .branch(
            dptree::filter_map(|msg: Message| msg.text().and_then(Menu::parse))
                .endpoint(switch_mode),
        )
        .branch(dptree::case![State::Start].endpoint(start))
        .branch(dptree::case![State::Grid].endpoint(pick_cell))
        .branch(dptree::case![State::Learn(fact)].endpoint(learn))
        .branch(dptree::case![State::Quiz(session)].endpoint(quiz))
        .branch(dptree::case![State::Tutor(session)].endpoint(tutor_chat));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![InMemStorage::<State>::new(), tutor])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

const GREETING_TEXT: &str = "Hi Tangtang! 👋 Welcome to Tangtang's Math Adventure!\n\
    Let's learn the times table together. 我们一起学乘法吧！";

async fn start(bot: Bot, dialogue: TrainerDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(keyboard(Vec::new()))
        .await?;

    show_grid(&bot, &dialogue, &msg).await
}

async fn switch_mode(
    bot: Bot,
    dialogue: TrainerDialogue,
    menu: Menu,
    msg: Message,
) -> HandlerResult {
    log::debug!("Chat {} switched to {:?}", msg.chat.id, menu);

    match menu {
        Menu::Start => start(bot, dialogue, msg).await,
        Menu::Table => show_grid(&bot, &dialogue, &msg).await,
        Menu::Chant => {
            bot.send_message(msg.chat.id, format!("<pre>{}</pre>", chant::chant_table()))
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard(Vec::new()))
                .await?;
            dialogue.update(State::Grid).await?;
            Ok(())
        }
        Menu::Quiz => {
            let session = QuizSession::start(&mut rand::thread_rng());
            send_question(&bot, &msg, &session).await?;
            dialogue.update(State::Quiz(session)).await?;
            Ok(())
        }
        Menu::Tutor => {
            let session = TutorSession::default();
            let greeting = session
                .transcript()
                .last()
                .map(|m| m.text.clone())
                .unwrap_or_default();
            bot.send_message(msg.chat.id, format!("🐱 Smarty Cat Tutor\n\n{}", greeting))
                .reply_markup(keyboard(Vec::new()))
                .await?;
            dialogue.update(State::Tutor(session)).await?;
            Ok(())
        }
    }
}

async fn show_grid(bot: &Bot, dialogue: &TrainerDialogue, msg: &Message) -> HandlerResult {
    let text = format!(
        "<pre>{}</pre>\n👆 点击格子查看详情 / Send two numbers like <b>3x4</b> to learn!",
        grid::render_grid()
    );
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard(Vec::new()))
        .await?;

    dialogue.update(State::Grid).await?;
    Ok(())
}

async fn pick_cell(bot: Bot, dialogue: TrainerDialogue, msg: Message) -> HandlerResult {
    let Some((a, b)) = msg.text().and_then(fact::parse_pick) else {
        bot.send_message(
            msg.chat.id,
            "Please send two numbers from 1 to 9, like 3x4 / 请发送两个 1 到 9 的数字，比如 3x4",
        )
        .await?;
        return Ok(());
    };

    let fact = MultiplicationFact::new(a, b);
    bot.send_message(msg.chat.id, grid::render_explainer(&fact))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard(vec![vec![KeyboardButton::new(BACK)]]))
        .await?;

    dialogue.update(State::Learn(fact)).await?;
    Ok(())
}

async fn learn(
    bot: Bot,
    dialogue: TrainerDialogue,
    fact: MultiplicationFact,
    msg: Message,
) -> HandlerResult {
    if msg.text() == Some(BACK) {
        log::debug!("Leaving the explainer for {} × {}", fact.a, fact.b);
        return show_grid(&bot, &dialogue, &msg).await;
    }

    // Another pick straight from the explainer
    pick_cell(bot, dialogue, msg).await
}

async fn send_question(bot: &Bot, msg: &Message, session: &QuizSession) -> HandlerResult {
    let question = session.question();
    let text = format!(
        "🏆 {}   🔥 {} Streak\n\nQuestion\n<b>{}</b>",
        session.score(),
        session.streak(),
        question.text()
    );

    let options = question
        .options
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|option| KeyboardButton::new(option.to_string()))
                .collect::<Vec<_>>()
        })
        .chain(std::iter::once(vec![KeyboardButton::new(SKIP)]))
        .collect::<Vec<_>>();

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard(options))
        .await?;
    Ok(())
}

/// What a message in quiz mode does to the session.
#[derive(Debug, PartialEq, Eq)]
enum QuizTurn {
    NotAnOption,
    AlreadyAnswered,
    /// The session has moved on; feedback is `None` for a skip.
    Next(Option<AnswerOutcome>),
}

/// Grades (or skips) and draws the next question. Sends nothing, so the caller
/// can store the session before talking to Telegram.
fn play_quiz_turn<R: rand::Rng + ?Sized>(
    session: &mut QuizSession,
    text: &str,
    rng: &mut R,
) -> QuizTurn {
    let text = text.trim();
    let mut feedback = None;

    if text != SKIP {
        let Some(value) = text
            .parse::<u32>()
            .ok()
            .filter(|value| session.question().options.contains(value))
        else {
            return QuizTurn::NotAnOption;
        };

        let Some(outcome) = session.answer(value) else {
            return QuizTurn::AlreadyAnswered;
        };
        feedback = Some(outcome);
    }

    session.advance(rng);
    QuizTurn::Next(feedback)
}

async fn quiz(
    bot: Bot,
    dialogue: TrainerDialogue,
    mut session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let text = msg.text().unwrap_or_default();
    let turn = play_quiz_turn(&mut session, text, &mut rand::thread_rng());

    let feedback = match turn {
        QuizTurn::NotAnOption => {
            bot.send_message(msg.chat.id, "Please pick one of the answers / 请选择一个答案")
                .await?;
            return Ok(());
        }
        QuizTurn::AlreadyAnswered => return Ok(()),
        QuizTurn::Next(feedback) => feedback,
    };

    // Score and streak are stored before anything is sent, so a failed send loses nothing
    dialogue.update(State::Quiz(session.clone())).await?;

    if let Some(outcome) = feedback {
        let mut reply = outcome.message();
        if outcome.celebrate {
            reply.push_str("\n\n🎉 ⭐ 🎉");
        }
        bot.send_message(msg.chat.id, reply).await?;
    }
    send_question(&bot, &msg, &session).await
}

async fn tutor_chat(
    bot: Bot,
    dialogue: TrainerDialogue,
    tutor: Arc<ChatGptTutor>,
    mut session: TutorSession,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Ask me a math question! 🐱 (text please)")
            .await?;
        return Ok(());
    };

    // We don't really care if this fails, it only shows "typing..." while the tutor thinks
    let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;

    let Some(reply) = session.send(&*tutor, text).await.map(|m| m.text.clone()) else {
        return Ok(());
    };

    // Keep the exchange in the transcript even if the reply can't be delivered
    dialogue.update(State::Tutor(session)).await?;

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

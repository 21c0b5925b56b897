//! Fixed user-facing strings in every site language.

use super::LocalizedContent;

pub fn error_title() -> LocalizedContent {
    return LocalizedContent::new("Ошибка", "Error", "Xato");
}

pub fn success_title() -> LocalizedContent {
    return LocalizedContent::new("Успех", "Success", "Muvaffaqiyat");
}

pub fn project_created() -> LocalizedContent {
    return LocalizedContent::new(
        "Проект успешно создан",
        "Project created successfully",
        "Loyiha muvaffaqiyatli yaratildi",
    );
}

pub fn project_create_failed() -> LocalizedContent {
    return LocalizedContent::new(
        "Ошибка при создании проекта",
        "Error creating project",
        "Loyihani yaratishda xatolik yuz berdi",
    );
}

pub fn project_updated() -> LocalizedContent {
    return LocalizedContent::new(
        "Проект успешно обновлен",
        "Project updated successfully",
        "Loyiha muvaffaqiyatli yangilandi",
    );
}

pub fn project_update_failed() -> LocalizedContent {
    return LocalizedContent::new(
        "Ошибка при обновлении проекта",
        "Error updating project",
        "Loyihani yangilashda xatolik yuz berdi",
    );
}

pub fn project_deleted() -> LocalizedContent {
    return LocalizedContent::new(
        "Проект успешно удален",
        "Project deleted successfully",
        "Loyiha muvaffaqiyatli o'chirildi",
    );
}

pub fn project_delete_failed() -> LocalizedContent {
    return LocalizedContent::new(
        "Ошибка при удалении проекта",
        "Error deleting project",
        "Loyihani o'chirishda xatolik yuz berdi",
    );
}

pub fn image_required() -> LocalizedContent {
    return LocalizedContent::new(
        "Пожалуйста, сделайте скриншот или укажите URL изображения",
        "Please capture a screenshot or provide an image URL",
        "Iltimos, skrinshot oling yoki rasm URL manzilini kiriting",
    );
}

pub fn website_url_required() -> LocalizedContent {
    return LocalizedContent::new(
        "Пожалуйста, введите URL сайта",
        "Please enter a website URL",
        "Iltimos, veb-sayt URL manzilini kiriting",
    );
}

pub fn screenshot_captured() -> LocalizedContent {
    return LocalizedContent::new(
        "Скриншот сайта успешно сделан",
        "Website screenshot captured successfully",
        "Veb-sayt skrinshoti muvaffaqiyatli olingan",
    );
}

pub fn screenshot_failed_title() -> LocalizedContent {
    return LocalizedContent::uniform("Screenshot Error");
}

pub fn screenshot_failed() -> LocalizedContent {
    return LocalizedContent::uniform("Could not capture screenshot. Using placeholder.");
}

pub fn sign_up_failed() -> LocalizedContent {
    return LocalizedContent::uniform("Sign Up Error");
}

pub fn sign_in_failed() -> LocalizedContent {
    return LocalizedContent::uniform("Sign In Error");
}

pub fn sign_out_failed() -> LocalizedContent {
    return LocalizedContent::uniform("Sign Out Error");
}

pub fn chat_welcome() -> LocalizedContent {
    return LocalizedContent::new(
        "Здравствуйте! Я ваш консультант по веб-разработке. Чем я могу помочь вам сегодня с вашим веб-проектом?",
        "Hello! I'm your web development consultant. How can I help you with your website project today?",
        "Salom! Men sizning veb-ishlab chiqish bo'yicha maslahatchimanman. Bugun veb-saytingiz loyihasi bilan qanday yordam bera olaman?",
    );
}

pub fn chat_system_prompt() -> LocalizedContent {
    return LocalizedContent::new(
        "Вы - полезный ассистент веб-разработчика. Отвечайте на вопросы, связанные с веб-разработкой, программированием и услугами разработчика. Сохраняйте ответы краткими, профессиональными и сосредоточенными на темах веб-разработки. Если вас спрашивают о темах, не связанных с веб-разработкой или услугами, вежливо верните разговор к тому, как вы можете помочь с темами веб-разработки.",
        "You are a helpful assistant for a web developer. Answer questions related to web development, programming, and the developer's services. Keep responses concise, professional, and focused on web development topics. If asked about topics unrelated to web development or the services, politely redirect the conversation back to how you can help with web development topics.",
        "Siz veb-dasturchining foydali yordamchisisiz. Veb-ishlab chiqarish, dasturlash va dasturchi xizmatlari bilan bog'liq savollarga javob bering. Veb-ishlab chiqarish mavzulariga oid qisqa, professional va aniq javoblarni saqlang. Agar sizdan veb-ishlab chiqarish yoki xizmatlar bilan bog'liq bo'lmagan mavzular haqida so'ralganda, suhbatni veb-ishlab chiqarish mavzularida qanday yordam bera olishingizga qaytaring.",
    );
}

pub const DEVELOPER_INFO: &str = "I am a web developer specializing in creating responsive, high-performance websites and web applications. My services include frontend development, backend development, UI/UX design, and website optimization. I work with technologies like React, Vue, Angular, Node.js, and other modern web technologies.";

pub const CHAT_ACKNOWLEDGMENT: &str = "I understand. I'll act as a helpful assistant for the web developer, focusing only on web development and related topics.";

pub fn chat_api_fallback() -> LocalizedContent {
    return LocalizedContent::new(
        "Извините, возникла проблема с обработкой вашего запроса. Пожалуйста, попробуйте позже или свяжитесь с нами напрямую.",
        "Sorry, there was an issue processing your request. Please try again later or contact us directly.",
        "Kechirasiz, so'rovingizni qayta ishlashda muammo yuzaga keldi. Iltimos, keyinroq qayta urinib ko'ring yoki biz bilan to'g'ridan-to'g'ri bog'laning.",
    );
}

pub fn chat_transport_fallback() -> LocalizedContent {
    return LocalizedContent::new(
        "Извините, произошла ошибка при обработке вашего запроса. Пожалуйста, повторите попытку позже.",
        "Sorry, there was an error processing your request. Please try again later.",
        "Kechirasiz, so'rovingizni qayta ishlashda xatolik yuz berdi. Iltimos, keyinroq qayta urinib ko'ring.",
    );
}

pub fn chat_bubble() -> LocalizedContent {
    return LocalizedContent::new(
        "Привет! Чем я могу помочь?",
        "Hello! How can I help you?",
        "Salom! Qanday yordam bera olaman?",
    );
}

pub fn chat_header() -> LocalizedContent {
    return LocalizedContent::new("Консультант", "Consultant", "Maslahatchi");
}

pub fn chat_placeholder() -> LocalizedContent {
    return LocalizedContent::new("Введите сообщение...", "Type a message...", "Xabar kiriting...");
}
